//! Discord adapters.
//!
//! - `DiscordClient` - `ChatSurface` over the Discord REST API
//! - `Interaction` / `InteractionResponse` - inbound interaction payloads
//! - `render` - panel, modal and trigger message payloads

mod client;
mod interaction;
pub mod render;

pub use client::{DiscordClient, DiscordClientConfig, DEFAULT_API_BASE_URL};
pub use interaction::{
    InboundEvent, Interaction, InteractionError, InteractionResponse, EPHEMERAL, SETUP_COMMAND,
};
