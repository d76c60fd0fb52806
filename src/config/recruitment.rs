//! Recruitment configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::recruitment::{RoleCapacity, MAX_TITLE_LENGTH};

/// Longest channel name Discord accepts.
const MAX_CHANNEL_NAME_LENGTH: usize = 100;

/// Largest value the two-character capacity inputs can hold.
const MAX_FORM_CAPACITY: u32 = 99;

/// Recruitment defaults
#[derive(Debug, Clone, Deserialize)]
pub struct RecruitmentConfig {
    /// Tank slots pre-filled in the intake form
    #[serde(default = "default_tank")]
    pub default_tank: u32,

    /// Healer slots pre-filled in the intake form
    #[serde(default = "default_healer")]
    pub default_healer: u32,

    /// DPS slots pre-filled in the intake form
    #[serde(default = "default_dps")]
    pub default_dps: u32,

    #[serde(default = "default_voice_room_prefix")]
    pub voice_room_prefix: String,

    #[serde(default = "default_voice_room_suffix")]
    pub voice_room_suffix: String,
}

impl RecruitmentConfig {
    pub fn default_capacity(&self) -> RoleCapacity {
        RoleCapacity::new(self.default_tank, self.default_healer, self.default_dps)
    }

    /// Validate recruitment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("tank", self.default_tank),
            ("healer", self.default_healer),
            ("dps", self.default_dps),
        ] {
            if value > MAX_FORM_CAPACITY {
                return Err(ValidationError::InvalidDefaultCapacity(name));
            }
        }

        let affix = self.voice_room_prefix.chars().count() + self.voice_room_suffix.chars().count();
        if affix + MAX_TITLE_LENGTH > MAX_CHANNEL_NAME_LENGTH {
            return Err(ValidationError::VoiceRoomAffixTooLong);
        }
        Ok(())
    }
}

impl Default for RecruitmentConfig {
    fn default() -> Self {
        Self {
            default_tank: default_tank(),
            default_healer: default_healer(),
            default_dps: default_dps(),
            voice_room_prefix: default_voice_room_prefix(),
            voice_room_suffix: default_voice_room_suffix(),
        }
    }
}

fn default_tank() -> u32 {
    2
}

fn default_healer() -> u32 {
    2
}

fn default_dps() -> u32 {
    4
}

fn default_voice_room_prefix() -> String {
    "🔑_".to_string()
}

fn default_voice_room_suffix() -> String {
    "_VC".to_string()
}
