//! ReleaseRoleHandler - Frees the slot a member currently holds.

use std::sync::Arc;

use tracing::{debug, info};

use super::claim_role::RosterTransitionResult;
use super::errors::RecruitmentError;
use super::panel_sync::PanelSync;
use crate::domain::foundation::{ActorId, ChannelId, SessionId};
use crate::domain::recruitment::SessionEngine;
use crate::ports::{SessionStore, SessionStoreExt};

#[derive(Debug, Clone, Copy)]
pub struct ReleaseRoleCommand {
    pub actor: ActorId,
    pub channel: ChannelId,
    pub session_id: SessionId,
}

pub struct ReleaseRoleHandler {
    store: Arc<dyn SessionStore>,
    panels: Arc<PanelSync>,
    engine: SessionEngine,
}

impl ReleaseRoleHandler {
    pub fn new(store: Arc<dyn SessionStore>, panels: Arc<PanelSync>) -> Self {
        Self {
            store,
            panels,
            engine: SessionEngine::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: ReleaseRoleCommand,
    ) -> Result<RosterTransitionResult, RecruitmentError> {
        let engine = self.engine;
        let snapshot = self
            .store
            .update(cmd.session_id, |session| {
                engine.release_role(cmd.session_id, session, cmd.actor)
            })
            .ok_or(RecruitmentError::SessionNotFound(cmd.session_id))?
            .map_err(|err| {
                debug!(
                    session_id = %cmd.session_id,
                    actor = %cmd.actor,
                    code = %err.code(),
                    "Role release rejected"
                );
                err
            })?;

        info!(session_id = %cmd.session_id, actor = %cmd.actor, "Role released");

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
