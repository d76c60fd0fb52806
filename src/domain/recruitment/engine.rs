//! Session engine - the recruitment state machine.
//!
//! All transitions are synchronous, in-memory computations over a single
//! session. A transition either applies completely or leaves the session
//! untouched; no transition ever awaits collaborator I/O.

use super::errors::{ClaimError, CloseError, IntakeError, ReleaseError};
use super::intake::{split_date_time, IntakeForm};
use super::role::Role;
use super::session::{Session, SessionClosure, SessionDraft, SessionSnapshot};
use crate::domain::foundation::{ActorId, SessionId};

/// Stateless transition logic for recruitment sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionEngine;

impl SessionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validates a signup form and produces a session with empty rosters.
    ///
    /// Allocating the voice room and the panel message is left to the caller.
    ///
    /// # Errors
    ///
    /// - `EmptyTitle` / `TitleTooLong` for a bad title
    /// - `NonNumericCapacity` / `NegativeCapacity` for a bad slot count
    pub fn create(
        &self,
        host: ActorId,
        form: &IntakeForm,
        wants_voice_room: bool,
    ) -> Result<SessionDraft, IntakeError> {
        let title = form.validated_title()?;
        let capacity = form.capacity()?;
        let (date, time) = split_date_time(&form.date_time);

        let session = Session::new(host, title, date, time, capacity);
        Ok(SessionDraft::new(session, wants_voice_room))
    }

    /// Moves `actor` into `role`, vacating any role they currently hold.
    ///
    /// Destination capacity is checked before anything is removed, so a
    /// rejected claim never evicts the actor from their current slot.
    ///
    /// # Errors
    ///
    /// - `AlreadyInRole` if the actor already holds `role`
    /// - `RoleFull` if `role` has no free slot
    pub fn claim_role(
        &self,
        id: SessionId,
        session: &mut Session,
        actor: ActorId,
        role: Role,
    ) -> Result<SessionSnapshot, ClaimError> {
        let current = session.role_of(actor);
        if current == Some(role) {
            return Err(ClaimError::AlreadyInRole { role });
        }
        if session.is_full(role) {
            return Err(ClaimError::RoleFull { role });
        }

        if let Some(current) = current {
            session.detach(actor, current);
        }
        session.attach(actor, role);

        Ok(SessionSnapshot::new(id, session.clone()))
    }

    /// Removes `actor` from whichever role they hold.
    ///
    /// # Errors
    ///
    /// - `NotParticipating` if the actor holds no role
    pub fn release_role(
        &self,
        id: SessionId,
        session: &mut Session,
        actor: ActorId,
    ) -> Result<SessionSnapshot, ReleaseError> {
        let role = session
            .role_of(actor)
            .ok_or(ReleaseError::NotParticipating)?;
        session.detach(actor, role);

        Ok(SessionSnapshot::new(id, session.clone()))
    }

    /// Authorizes closing the session and reports what must be torn down.
    ///
    /// The session itself is not modified; the caller removes it from the
    /// store and destroys the voice room and panel message.
    ///
    /// # Errors
    ///
    /// - `NotHost` if `actor` did not create the session
    pub fn close(
        &self,
        id: SessionId,
        session: &Session,
        actor: ActorId,
    ) -> Result<SessionClosure, CloseError> {
        if !session.is_host(actor) {
            return Err(CloseError::NotHost);
        }
        Ok(SessionClosure {
            session_id: id,
            voice_room: session.voice_room(),
        })
    }
}
