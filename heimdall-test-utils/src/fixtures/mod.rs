//! Test fixture modules for database and HTTP mock creation.
//!
//! - `auth` - Login session records
//! - `discord` - Mock Discord OAuth and REST endpoints
//! - `github` - Mock GitHub OAuth and REST endpoints
//! - `user` - Users and the keys anchoring them to provider identities

pub mod auth;
pub mod discord;
pub mod github;
pub mod user;
