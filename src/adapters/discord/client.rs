//! Discord REST client - Implementation of ChatSurface over the Discord HTTP API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = DiscordClientConfig::new(bot_token)
//!     .with_base_url("https://discord.com/api/v10")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = DiscordClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::render::{panel_message, placeholder_message};
use crate::domain::foundation::{ChannelId, GuildId, MessageId, VoiceRoomId};
use crate::domain::recruitment::PanelView;
use crate::ports::{ChatSurface, SurfaceError};

pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";

/// Discord channel type for guild voice channels.
const GUILD_VOICE: u8 = 2;

/// Configuration for the Discord client.
#[derive(Debug, Clone)]
pub struct DiscordClientConfig {
    bot_token: SecretString,
    /// Base URL for the API (default: https://discord.com/api/v10).
    pub base_url: String,
    pub timeout: Duration,
}

impl DiscordClientConfig {
    pub fn new(bot_token: SecretString) -> Self {
        Self {
            bot_token,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn authorization(&self) -> String {
        format!("Bot {}", self.bot_token.expose_secret())
    }
}

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: MessageId,
}

#[derive(Debug, Deserialize)]
struct CreatedChannel {
    id: VoiceRoomId,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Discord API client.
pub struct DiscordClient {
    config: DiscordClientConfig,
    client: Client,
}

impl DiscordClient {
    pub fn new(config: DiscordClientConfig) -> Result<Self, SurfaceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SurfaceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Sends an authorized request and maps non-success statuses.
    async fn send(&self, request: RequestBuilder) -> Result<Response, SurfaceError> {
        let response = request
            .header("Authorization", self.config.authorization())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SurfaceError::Network(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    SurfaceError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }
}

/// Maps a failed response to a surface error.
fn status_error(status: u16, body: &str) -> SurfaceError {
    if status == 404 {
        return SurfaceError::NotFound;
    }
    let message = serde_json::from_str::<ApiError>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| body.to_string());
    SurfaceError::Rejected { status, message }
}

#[async_trait]
impl ChatSurface for DiscordClient {
    async fn render_placeholder(&self, channel: ChannelId) -> Result<MessageId, SurfaceError> {
        let request = self
            .client
            .post(self.url(&format!("/channels/{}/messages", channel)))
            .json(&placeholder_message());
        let created: CreatedMessage = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| SurfaceError::Decode(e.to_string()))?;
        Ok(created.id)
    }

    async fn update_panel(
        &self,
        channel: ChannelId,
        message: MessageId,
        panel: &PanelView,
    ) -> Result<(), SurfaceError> {
        let request = self
            .client
            .patch(self.url(&format!("/channels/{}/messages/{}", channel, message)))
            .json(&panel_message(panel));
        self.send(request).await?;
        Ok(())
    }

    async fn create_voice_room(
        &self,
        guild: GuildId,
        name: &str,
    ) -> Result<VoiceRoomId, SurfaceError> {
        let request = self
            .client
            .post(self.url(&format!("/guilds/{}/channels", guild)))
            .json(&json!({ "name": name, "type": GUILD_VOICE }));
        let created: CreatedChannel = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| SurfaceError::Decode(e.to_string()))?;
        Ok(created.id)
    }

    async fn destroy_voice_room(&self, room: VoiceRoomId) -> Result<(), SurfaceError> {
        let request = self.client.delete(self.url(&format!("/channels/{}", room)));
        self.send(request).await?;
        Ok(())
    }

    async fn destroy_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), SurfaceError> {
        let request = self
            .client
            .delete(self.url(&format!("/channels/{}/messages/{}", channel, message)));
        self.send(request).await?;
        Ok(())
    }
}
