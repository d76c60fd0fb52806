//! Pushes freshly projected panels to the chat surface.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error};

use crate::domain::foundation::{ChannelId, SessionId};
use crate::domain::recruitment::{project, SessionSnapshot};
use crate::ports::{ChatSurface, SessionStore, SurfaceError};

/// Projects `snapshot` and re-renders its panel message.
///
/// Called only after the transition that produced `snapshot` has been
/// committed to the store.
pub async fn sync_panel(
    surface: &dyn ChatSurface,
    channel: ChannelId,
    snapshot: &SessionSnapshot,
) -> Result<(), SurfaceError> {
    let view = project(snapshot);
    surface
        .update_panel(channel, snapshot.id.message_id(), &view)
        .await
        .map_err(|err| {
            error!(
                session_id = %snapshot.id,
                channel = %channel,
                error = %err,
                "Failed to update recruitment panel"
            );
            err
        })
}

/// Re-renders panels one at a time per session, always from the latest
/// committed state.
///
/// Renders for the same session never overlap, and each one reads the store
/// only once it holds the session's render lock, so the last render to
/// finish always shows the last committed transition.
pub struct PanelSync {
    store: Arc<dyn SessionStore>,
    surface: Arc<dyn ChatSurface>,
    render_locks: Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<()>>>>,
}

impl PanelSync {
    pub fn new(store: Arc<dyn SessionStore>, surface: Arc<dyn ChatSurface>) -> Self {
        Self {
            store,
            surface,
            render_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Renders the current state of `session_id` into its panel.
    ///
    /// A session that is no longer stored has had its panel removed; there
    /// is nothing left to render.
    pub async fn refresh(
        &self,
        channel: ChannelId,
        session_id: SessionId,
    ) -> Result<(), SurfaceError> {
        let lock = self.render_lock(session_id);
        let _guard = lock.lock().await;

        match self.store.get(session_id) {
            Some(session) => {
                let snapshot = SessionSnapshot::new(session_id, session);
                sync_panel(self.surface.as_ref(), channel, &snapshot).await
            }
            None => {
                debug!(session_id = %session_id, "Session gone, skipping panel render");
                self.forget(session_id);
                Ok(())
            }
        }
    }

    /// Waits for any in-flight render of a removed session, then drops its
    /// render lock. Call after the session has left the store.
    pub async fn retire(&self, session_id: SessionId) {
        let lock = self.render_lock(session_id);
        let _guard = lock.lock().await;
        self.forget(session_id);
    }

    fn forget(&self, session_id: SessionId) {
        self.render_locks.lock().remove(&session_id);
    }

    fn render_lock(&self, session_id: SessionId) -> Arc<tokio::sync::Mutex<()>> {
        self.render_locks
            .lock()
            .entry(session_id)
            .or_default()
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn tracked_sessions(&self) -> usize {
        self.render_locks.lock().len()
    }
}

/// Recording chat surface for handler tests.
#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::domain::foundation::{GuildId, MessageId, VoiceRoomId};
    use crate::domain::recruitment::PanelView;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SurfaceCall {
        RenderPlaceholder(ChannelId),
        UpdatePanel {
            channel: ChannelId,
            message: MessageId,
            view: PanelView,
        },
        CreateVoiceRoom {
            guild: GuildId,
            name: String,
        },
        DestroyVoiceRoom(VoiceRoomId),
        DestroyMessage {
            channel: ChannelId,
            message: MessageId,
        },
    }

    /// Records every call; individual operations can be made to fail.
    #[derive(Default)]
    pub struct RecordingSurface {
        calls: Mutex<Vec<SurfaceCall>>,
        next_id: AtomicU64,
        fail_placeholder: bool,
        fail_update: bool,
        fail_voice_room: bool,
        fail_destroy: bool,
        first_update_delay: Option<Duration>,
        first_update_seen: AtomicBool,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self {
                next_id: AtomicU64::new(1000),
                ..Self::default()
            }
        }

        pub fn failing_placeholder(mut self) -> Self {
            self.fail_placeholder = true;
            self
        }

        pub fn failing_update(mut self) -> Self {
            self.fail_update = true;
            self
        }

        pub fn failing_voice_room(mut self) -> Self {
            self.fail_voice_room = true;
            self
        }

        pub fn failing_destroy(mut self) -> Self {
            self.fail_destroy = true;
            self
        }

        /// Holds the first panel update for `delay` before it lands.
        pub fn delaying_first_update(mut self, delay: Duration) -> Self {
            self.first_update_delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Vec<SurfaceCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn last_view(&self) -> Option<PanelView> {
            self.calls().into_iter().rev().find_map(|call| match call {
                SurfaceCall::UpdatePanel { view, .. } => Some(view),
                _ => None,
            })
        }

        pub fn update_count(&self) -> usize {
            self.calls()
                .iter()
                .filter(|call| matches!(call, SurfaceCall::UpdatePanel { .. }))
                .count()
        }

        fn record(&self, call: SurfaceCall) {
            self.calls.lock().unwrap().push(call);
        }

        fn next(&self) -> u64 {
            self.next_id.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn rejected() -> SurfaceError {
        SurfaceError::Rejected {
            status: 403,
            message: "Missing Permissions".to_string(),
        }
    }

    #[async_trait]
    impl ChatSurface for RecordingSurface {
        async fn render_placeholder(&self, channel: ChannelId) -> Result<MessageId, SurfaceError> {
            self.record(SurfaceCall::RenderPlaceholder(channel));
            if self.fail_placeholder {
                return Err(rejected());
            }
            Ok(MessageId::new(self.next()))
        }

        async fn update_panel(
            &self,
            channel: ChannelId,
            message: MessageId,
            panel: &PanelView,
        ) -> Result<(), SurfaceError> {
            if let Some(delay) = self.first_update_delay {
                if !self.first_update_seen.swap(true, Ordering::SeqCst) {
                    tokio::time::sleep(delay).await;
                }
            }
            self.record(SurfaceCall::UpdatePanel {
                channel,
                message,
                view: panel.clone(),
            });
            if self.fail_update {
                return Err(SurfaceError::NotFound);
            }
            Ok(())
        }

        async fn create_voice_room(
            &self,
            guild: GuildId,
            name: &str,
        ) -> Result<VoiceRoomId, SurfaceError> {
            self.record(SurfaceCall::CreateVoiceRoom {
                guild,
                name: name.to_string(),
            });
            if self.fail_voice_room {
                return Err(rejected());
            }
            Ok(VoiceRoomId::new(self.next()))
        }

        async fn destroy_voice_room(&self, room: VoiceRoomId) -> Result<(), SurfaceError> {
            self.record(SurfaceCall::DestroyVoiceRoom(room));
            if self.fail_destroy {
                return Err(SurfaceError::Network("connection reset".to_string()));
            }
            Ok(())
        }

        async fn destroy_message(
            &self,
            channel: ChannelId,
            message: MessageId,
        ) -> Result<(), SurfaceError> {
            self.record(SurfaceCall::DestroyMessage { channel, message });
            if self.fail_destroy {
                return Err(SurfaceError::Network("connection reset".to_string()));
            }
            Ok(())
        }
    }
}
