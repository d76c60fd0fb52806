//! Party Recruit - Discord party recruitment panels
//!
//! Members open a signup form, the bot posts a panel with one button per
//! role, and players claim or release slots until the host closes the
//! recruitment. Interactions arrive over HTTP from a signing relay; panel
//! and voice-room changes go out through the Discord REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
