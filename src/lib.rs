//! Heimdall: OAuth login, durable user accounts, and cookie-backed sessions.
//!
//! `model` holds the DTOs shared with API consumers, `server` holds everything that runs
//! inside the axum service.

pub mod model;
pub mod server;
