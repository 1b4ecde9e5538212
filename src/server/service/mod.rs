//! Service layer for business logic and orchestration.
//!
//! Services coordinate between the repositories and the OAuth providers and implement the
//! multi-step operations of the login flow: resolving a provider identity to a user, creating
//! and validating login sessions, and completing an OAuth callback.

pub mod auth;
pub mod session;
pub mod user;
