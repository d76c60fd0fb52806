//! Chat Surface Port - Side effects on the chat platform.
//!
//! The core calls into this port after a transition has been committed to
//! the [`SessionStore`](super::SessionStore). Implementations talk to the
//! platform API; tests use recording fakes.

use async_trait::async_trait;

use crate::domain::foundation::{ChannelId, ErrorCode, GuildId, MessageId, VoiceRoomId};
use crate::domain::recruitment::PanelView;

/// Errors returned by chat surface operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The target message, channel or room no longer exists.
    #[error("target not found on chat surface")]
    NotFound,

    #[error("chat surface rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode chat surface response: {0}")]
    Decode(String),
}

impl SurfaceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SurfaceError::NotFound => ErrorCode::SurfaceNotFound,
            SurfaceError::Rejected { .. } => ErrorCode::SurfaceRejected,
            SurfaceError::Network(_) => ErrorCode::NetworkError,
            SurfaceError::Decode(_) => ErrorCode::DecodeError,
        }
    }
}

/// Port for rendering panels and managing voice rooms.
#[async_trait]
pub trait ChatSurface: Send + Sync {
    /// Posts a placeholder panel message and returns its id.
    ///
    /// The id becomes the session key; the real panel is pushed with
    /// [`update_panel`](Self::update_panel) once the session is registered.
    async fn render_placeholder(&self, channel: ChannelId) -> Result<MessageId, SurfaceError>;

    /// Re-renders an existing panel message.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the message was deleted
    async fn update_panel(
        &self,
        channel: ChannelId,
        message: MessageId,
        panel: &PanelView,
    ) -> Result<(), SurfaceError>;

    /// Creates a voice room named `name` in `guild`.
    async fn create_voice_room(
        &self,
        guild: GuildId,
        name: &str,
    ) -> Result<VoiceRoomId, SurfaceError>;

    async fn destroy_voice_room(&self, room: VoiceRoomId) -> Result<(), SurfaceError>;

    async fn destroy_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), SurfaceError>;
}
