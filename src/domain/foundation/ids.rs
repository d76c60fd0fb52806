//! Strongly-typed Discord snowflake identifiers.
//!
//! Discord transmits snowflakes as decimal strings, but some relays forward
//! them as plain integers. Every identifier here deserializes from either form
//! and always serializes back as a string.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw snowflake value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw snowflake value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_snowflake(s)
                    .map(Self)
                    .ok_or_else(|| ValidationError::invalid_format($field, format!("'{}' is not a snowflake", s)))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(SnowflakeVisitor).map(Self)
            }
        }
    };
}

snowflake_id!(
    /// A chat member acting on a panel (host or participant).
    ActorId,
    "actor_id"
);

snowflake_id!(
    /// A text channel that panels are posted into.
    ChannelId,
    "channel_id"
);

snowflake_id!(
    /// A guild (server) that owns channels and voice rooms.
    GuildId,
    "guild_id"
);

snowflake_id!(
    /// A posted chat message.
    MessageId,
    "message_id"
);

snowflake_id!(
    /// A voice channel created for a recruitment.
    VoiceRoomId,
    "voice_room_id"
);

snowflake_id!(
    /// Primary key of a recruitment session.
    ///
    /// A session is keyed by the message that renders its panel, so the value
    /// is assigned once the panel is first posted and never changes afterwards.
    SessionId,
    "session_id"
);

impl SessionId {
    /// Keys a session by the message that renders its panel.
    pub const fn from_message(message: MessageId) -> Self {
        Self(message.get())
    }

    /// Returns the panel message this session is rendered into.
    pub const fn message_id(self) -> MessageId {
        MessageId::new(self.0)
    }
}

fn parse_snowflake(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

struct SnowflakeVisitor;

impl<'de> de::Visitor<'de> for SnowflakeVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a decimal string or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        parse_snowflake(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}
