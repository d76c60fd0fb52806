//! CreateRecruitmentHandler - Opens a new recruitment panel from a submitted form.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::errors::RecruitmentError;
use super::panel_sync::sync_panel;
use super::settings::RecruitmentSettings;
use crate::domain::foundation::{ActorId, ChannelId, GuildId, MessageId, SessionId, VoiceRoomId};
use crate::domain::recruitment::{IntakeForm, SessionEngine, SessionSnapshot};
use crate::ports::{ChatSurface, SessionStore};

/// Command to create a recruitment from an intake form.
#[derive(Debug, Clone)]
pub struct CreateRecruitmentCommand {
    pub host: ActorId,
    pub guild: GuildId,
    /// Channel the form was submitted from.
    pub channel: ChannelId,
    pub form: IntakeForm,
    pub wants_voice_room: bool,
}

/// Result of successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecruitmentResult {
    pub session_id: SessionId,
    pub guild: GuildId,
    /// Channel the panel was posted to.
    pub channel: ChannelId,
    pub voice_room: Option<VoiceRoomId>,
}

/// Handler for creating recruitments.
///
/// Nothing is committed to the store until the panel message exists. Any
/// failure before that point releases what was already allocated.
pub struct CreateRecruitmentHandler {
    store: Arc<dyn SessionStore>,
    surface: Arc<dyn ChatSurface>,
    settings: Arc<RecruitmentSettings>,
    engine: SessionEngine,
}

impl CreateRecruitmentHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        surface: Arc<dyn ChatSurface>,
        settings: Arc<RecruitmentSettings>,
    ) -> Self {
        Self {
            store,
            surface,
            settings,
            engine: SessionEngine::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateRecruitmentCommand,
    ) -> Result<CreateRecruitmentResult, RecruitmentError> {
        // 1. Validate intake
        let draft = self
            .engine
            .create(cmd.host, &cmd.form, cmd.wants_voice_room)
            .map_err(|err| {
                debug!(actor = %cmd.host, code = %err.code(), "Recruitment intake rejected");
                err
            })?;

        let channel = self.settings.panel_channel(cmd.channel);

        // 2. Allocate the voice room
        let voice_room = if draft.wants_voice_room() {
            let name = self.settings.voice_room_name(draft.session().title());
            match self.surface.create_voice_room(cmd.guild, &name).await {
                Ok(room) => Some(room),
                Err(err) => {
                    error!(guild = %cmd.guild, error = %err, "Failed to create voice room");
                    return Err(err.into());
                }
            }
        } else {
            None
        };

        // 3. Reserve the panel message; its id becomes the session id
        let message = match self.surface.render_placeholder(channel).await {
            Ok(message) => message,
            Err(err) => {
                error!(channel = %channel, error = %err, "Failed to post recruitment panel");
                self.release(channel, None, voice_room).await;
                return Err(err.into());
            }
        };
        let session_id = SessionId::from_message(message);

        // 4. Commit
        let session = draft.into_session(voice_room);
        self.store.put(session_id, session.clone());

        // 5. Render the real panel
        let snapshot = SessionSnapshot::new(session_id, session);
        if let Err(err) = sync_panel(self.surface.as_ref(), channel, &snapshot).await {
            self.store.remove(session_id);
            self.release(channel, Some(message), voice_room).await;
            return Err(err.into());
        }

        info!(
            session_id = %session_id,
            host = %cmd.host,
            channel = %channel,
            voice_room = ?voice_room.map(|room| room.get()),
            "Recruitment created"
        );

        Ok(CreateRecruitmentResult {
            session_id,
            guild: cmd.guild,
            channel,
            voice_room,
        })
    }

    /// Best-effort teardown of side effects from an aborted creation.
    async fn release(
        &self,
        channel: ChannelId,
        message: Option<MessageId>,
        voice_room: Option<VoiceRoomId>,
    ) {
        if let Some(message) = message {
            if let Err(err) = self.surface.destroy_message(channel, message).await {
                warn!(message = %message, error = %err, "Failed to remove aborted panel");
            }
        }
        if let Some(room) = voice_room {
            if let Err(err) = self.surface.destroy_voice_room(room).await {
                warn!(voice_room = %room, error = %err, "Failed to remove aborted voice room");
            }
        }
    }
}
