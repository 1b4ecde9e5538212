//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries for the three authentication tables: users, the keys
//! anchoring them to provider identities, and login sessions. Every repository is generic
//! over [`sea_orm::ConnectionTrait`] so it works on a pool or inside a transaction.

pub mod key;
pub mod session;
pub mod user;
