//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process session store
//! - `discord` - Discord REST client and interaction payloads
//! - `http` - Signed interaction endpoint and health check

pub mod discord;
pub mod http;
pub mod memory;

pub use discord::{DiscordClient, DiscordClientConfig};
pub use http::{interaction_router, InteractionAppState, RelayVerifier};
pub use memory::InMemorySessionStore;
