//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Engine transitions are committed to the session store before any chat
//! surface I/O is issued.

pub mod handlers;

pub use handlers::{
    InteractionContext, InteractionReply, RecruitmentDispatcher, RecruitmentError,
    RecruitmentSettings,
};
