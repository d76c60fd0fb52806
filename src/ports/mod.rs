//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - In-process registry of live sessions (synchronous)
//! - `ChatSurface` - Panel rendering and voice room management (async)

mod chat_surface;
mod session_store;

pub use chat_surface::{ChatSurface, SurfaceError};
pub use session_store::{SessionStore, SessionStoreExt};
