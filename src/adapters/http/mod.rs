//! HTTP adapters - Interaction endpoint for the gateway relay.

mod dto;
mod handlers;
mod routes;
mod signature;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::{health, receive_interaction, InteractionAppState};
pub use routes::interaction_router;
pub use signature::{RelayVerifier, SignatureError, SignatureHeader, SIGNATURE_HEADER};
