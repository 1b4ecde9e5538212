//! HTTP controller endpoints for the Heimdall web API.
//!
//! This module contains Axum handlers for the OAuth login flow, login-session management,
//! and the auth-gated shell page. Controllers validate inputs, call into services, and map
//! results onto HTTP responses. Login sessions travel in a cookie; the tower-sessions browser
//! session only carries the CSRF state of a pending login. API handlers are documented with
//! utoipa.

pub mod auth;
pub mod shell;
pub mod user;
pub mod util;
