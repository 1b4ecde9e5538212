//! Helpers shared by the HTTP handlers.

pub mod cookie;
pub mod csrf;
pub mod session;
