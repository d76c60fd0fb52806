//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `PARTY_RECRUIT` prefix using the `config` and `dotenvy` crates. Nested
//! values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use party_recruit::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {}", config.server.bind_address());
//! ```

mod discord;
mod error;
mod recruitment;
mod server;

pub use discord::DiscordConfig;
pub use error::{ConfigError, ValidationError};
pub use recruitment::RecruitmentConfig;
pub use server::{LogFormat, ServerConfig};

use serde::Deserialize;

use crate::application::RecruitmentSettings;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Discord credentials and relay verification
    pub discord: DiscordConfig,

    /// Recruitment defaults
    #[serde(default)]
    pub recruitment: RecruitmentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `PARTY_RECRUIT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PARTY_RECRUIT__DISCORD__BOT_TOKEN=...` -> `discord.bot_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARTY_RECRUIT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.discord.validate()?;
        self.recruitment.validate()?;
        Ok(())
    }

    /// Settings consumed by the recruitment handlers.
    pub fn recruitment_settings(&self) -> RecruitmentSettings {
        RecruitmentSettings {
            default_capacity: self.recruitment.default_capacity(),
            voice_room_prefix: self.recruitment.voice_room_prefix.clone(),
            voice_room_suffix: self.recruitment.voice_room_suffix.clone(),
            target_channel: self.discord.target_channel_id,
        }
    }
}
