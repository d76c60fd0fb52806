//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers and error codes that form the vocabulary
//! shared by every part of the recruitment domain.

mod errors;
mod ids;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{ActorId, ChannelId, GuildId, MessageId, SessionId, VoiceRoomId};
