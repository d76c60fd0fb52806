//! ClaimRoleHandler - Moves a member into a role slot.

use std::sync::Arc;

use tracing::{debug, info};

use super::errors::RecruitmentError;
use super::panel_sync::PanelSync;
use crate::domain::foundation::{ActorId, ChannelId, SessionId};
use crate::domain::recruitment::{Role, SessionEngine, SessionSnapshot};
use crate::ports::{SessionStore, SessionStoreExt};

#[derive(Debug, Clone, Copy)]
pub struct ClaimRoleCommand {
    pub actor: ActorId,
    /// Channel holding the panel message.
    pub channel: ChannelId,
    pub session_id: SessionId,
    pub role: Role,
}

/// Outcome of a committed roster transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTransitionResult {
    pub snapshot: SessionSnapshot,
    /// False when the transition was committed but the panel could not be
    /// re-rendered.
    pub panel_synced: bool,
}

pub struct ClaimRoleHandler {
    store: Arc<dyn SessionStore>,
    panels: Arc<PanelSync>,
    engine: SessionEngine,
}

impl ClaimRoleHandler {
    pub fn new(store: Arc<dyn SessionStore>, panels: Arc<PanelSync>) -> Self {
        Self {
            store,
            panels,
            engine: SessionEngine::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: ClaimRoleCommand,
    ) -> Result<RosterTransitionResult, RecruitmentError> {
        let engine = self.engine;
        let outcome = self
            .store
            .update(cmd.session_id, |session| {
                engine.claim_role(cmd.session_id, session, cmd.actor, cmd.role)
            })
            .ok_or(RecruitmentError::SessionNotFound(cmd.session_id))?;

        let snapshot = outcome.map_err(|err| {
            debug!(
                session_id = %cmd.session_id,
                actor = %cmd.actor,
                role = %cmd.role,
                code = %err.code(),
                "Role claim rejected"
            );
            err
        })?;

        info!(
            session_id = %cmd.session_id,
            actor = %cmd.actor,
            role = %cmd.role,
            "Role claimed"
        );

        let panel_synced = self
            .panels
            .refresh(cmd.channel, cmd.session_id)
            .await
            .is_ok();

        Ok(RosterTransitionResult {
            snapshot,
            panel_synced,
        })
    }
}
