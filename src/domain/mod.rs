//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (snowflake IDs, error codes)
//! - `recruitment` - Session lifecycle, role claims and panel projection

pub mod foundation;
pub mod recruitment;
