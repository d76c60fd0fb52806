//! Recruitment session aggregate.
//!
//! A session is one signup instance: a host, a schedule, fixed per-role
//! capacities and a live roster. Sessions are keyed externally by the panel
//! message that renders them, so the aggregate itself does not carry its id.

use serde::{Deserialize, Serialize};

use super::role::{PerRole, Role};
use crate::domain::foundation::{ActorId, SessionId, VoiceRoomId};

/// Maximum number of slots allowed for each role.
pub type RoleCapacity = PerRole<u32>;

/// Ordered member list for each role. Insertion order is display order.
pub type Roster = PerRole<Vec<ActorId>>;

/// Recruitment session state.
///
/// # Invariants
///
/// - An actor appears in at most one role's roster
/// - `roster[role].len() <= capacity[role]` for every role
/// - `host` and `capacity` never change after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    host: ActorId,
    title: String,
    date: String,
    time: String,
    capacity: RoleCapacity,
    roster: Roster,
    voice_room: Option<VoiceRoomId>,
}

impl Session {
    pub(super) fn new(
        host: ActorId,
        title: String,
        date: String,
        time: String,
        capacity: RoleCapacity,
    ) -> Self {
        Self {
            host,
            title,
            date,
            time,
            capacity,
            roster: Roster::default(),
            voice_room: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn host(&self) -> ActorId {
        self.host
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// May be empty when the schedule had a single token.
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn capacity(&self, role: Role) -> u32 {
        self.capacity[role]
    }

    pub fn members(&self, role: Role) -> &[ActorId] {
        &self.roster[role]
    }

    pub fn count(&self, role: Role) -> usize {
        self.roster[role].len()
    }

    pub fn voice_room(&self) -> Option<VoiceRoomId> {
        self.voice_room
    }

    /// Returns true when no further claims for `role` can be accepted.
    pub fn is_full(&self, role: Role) -> bool {
        self.count(role) >= self.capacity[role] as usize
    }

    /// The role currently held by `actor`, if any.
    pub fn role_of(&self, actor: ActorId) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| self.roster[*role].contains(&actor))
    }

    pub fn is_host(&self, actor: ActorId) -> bool {
        self.host == actor
    }

    /// Total number of claimed slots across all roles.
    pub fn participant_count(&self) -> usize {
        Role::ALL.into_iter().map(|role| self.count(role)).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Roster primitives (used by the engine only)
    // ─────────────────────────────────────────────────────────────────────────

    /// Removes `actor` from `role`, keeping the order of the remaining members.
    pub(super) fn detach(&mut self, actor: ActorId, role: Role) {
        self.roster[role].retain(|member| *member != actor);
    }

    pub(super) fn attach(&mut self, actor: ActorId, role: Role) {
        self.roster[role].push(actor);
    }
}

/// A validated session that has not yet been registered in a store.
///
/// The caller performs the collaborator side effects (voice room, panel
/// message) and then turns the draft into a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    session: Session,
    wants_voice_room: bool,
}

impl SessionDraft {
    pub(super) fn new(session: Session, wants_voice_room: bool) -> Self {
        Self {
            session,
            wants_voice_room,
        }
    }

    pub fn wants_voice_room(&self) -> bool {
        self.wants_voice_room
    }

    /// The session as it will be registered (empty rosters, no voice room yet).
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Finalizes the draft with the voice room created for it, if any.
    pub fn into_session(self, voice_room: Option<VoiceRoomId>) -> Session {
        let mut session = self.session;
        session.voice_room = voice_room;
        session
    }
}

/// A session paired with its key, as read right after a committed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub session: Session,
}

impl SessionSnapshot {
    pub fn new(id: SessionId, session: Session) -> Self {
        Self { id, session }
    }
}

/// Outcome of a successful close: what the caller must tear down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClosure {
    pub session_id: SessionId,
    pub voice_room: Option<VoiceRoomId>,
}
