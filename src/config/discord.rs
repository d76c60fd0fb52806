//! Discord configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::discord::DEFAULT_API_BASE_URL;
use crate::domain::foundation::ChannelId;

/// Discord configuration (bot credentials and relay verification)
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token used for REST calls
    pub bot_token: SecretString,

    /// Base URL for the REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Shared secret the gateway relay signs interactions with
    pub relay_secret: SecretString,

    /// Channel that receives every panel; unset posts next to the form
    pub target_channel_id: Option<ChannelId>,

    /// REST request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl DiscordConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Discord configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("DISCORD__BOT_TOKEN"));
        }
        if self.relay_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("DISCORD__RELAY_SECRET"));
        }
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}
