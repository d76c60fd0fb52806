//! CloseRecruitmentHandler - Host-only teardown of a recruitment.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::errors::RecruitmentError;
use super::panel_sync::PanelSync;
use crate::domain::foundation::{ActorId, ChannelId, SessionId};
use crate::domain::recruitment::{SessionClosure, SessionEngine};
use crate::ports::{ChatSurface, SessionStore, SessionStoreExt};

#[derive(Debug, Clone, Copy)]
pub struct CloseRecruitmentCommand {
    pub actor: ActorId,
    pub channel: ChannelId,
    pub session_id: SessionId,
}

/// Result of a close. The session is gone from the store regardless of the
/// cleanup flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRecruitmentResult {
    pub closure: SessionClosure,
    pub voice_room_removed: bool,
    pub panel_removed: bool,
}

pub struct CloseRecruitmentHandler {
    store: Arc<dyn SessionStore>,
    surface: Arc<dyn ChatSurface>,
    panels: Arc<PanelSync>,
    engine: SessionEngine,
}

impl CloseRecruitmentHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        surface: Arc<dyn ChatSurface>,
        panels: Arc<PanelSync>,
    ) -> Self {
        Self {
            store,
            surface,
            panels,
            engine: SessionEngine::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CloseRecruitmentCommand,
    ) -> Result<CloseRecruitmentResult, RecruitmentError> {
        let engine = self.engine;
        let closure = self
            .store
            .update(cmd.session_id, |session| {
                engine.close(cmd.session_id, session, cmd.actor)
            })
            .ok_or(RecruitmentError::SessionNotFound(cmd.session_id))?
            .map_err(|err| {
                debug!(
                    session_id = %cmd.session_id,
                    actor = %cmd.actor,
                    code = %err.code(),
                    "Close rejected"
                );
                err
            })?;

        // Commit the removal before any cleanup I/O. A concurrent close that
        // got here first owns the teardown.
        if self.store.remove(cmd.session_id).is_none() {
            return Err(RecruitmentError::SessionNotFound(cmd.session_id));
        }

        info!(session_id = %cmd.session_id, host = %cmd.actor, "Recruitment closed");

        // No render may land on the panel after it is destroyed.
        self.panels.retire(cmd.session_id).await;

        let voice_room_removed = match closure.voice_room {
            Some(room) => match self.surface.destroy_voice_room(room).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(
                        session_id = %cmd.session_id,
                        voice_room = %room,
                        error = %err,
                        "Failed to remove voice room"
                    );
                    false
                }
            },
            None => true,
        };

        let panel_removed = match self
            .surface
            .destroy_message(cmd.channel, cmd.session_id.message_id())
            .await
        {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    session_id = %cmd.session_id,
                    channel = %cmd.channel,
                    error = %err,
                    "Failed to remove recruitment panel"
                );
                false
            }
        };

        Ok(CloseRecruitmentResult {
            closure,
            voice_room_removed,
            panel_removed,
        })
    }
}
