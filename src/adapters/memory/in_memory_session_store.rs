//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a process-wide map. Sessions are volatile and are lost
//! on restart; stale panels then resolve to "session not found".

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::recruitment::Session;
use crate::ports::SessionStore;

/// In-memory storage for recruitment sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.read().get(&id).cloned()
    }

    fn put(&self, id: SessionId, session: Session) {
        self.sessions.write().insert(id, session);
    }

    fn remove(&self, id: SessionId) -> Option<Session> {
        self.sessions.write().remove(&id)
    }

    fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().contains_key(&id)
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }

    fn modify(&self, id: SessionId, f: &mut dyn FnMut(&mut Session)) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get_mut(&id) {
            Some(session) => {
                f(session);
                true
            }
            None => false,
        }
    }
}
