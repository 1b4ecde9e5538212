//! Server application models and type definitions.
//!
//! This module contains the application state shared by every handler, database model type
//! aliases, and the browser-session data written during the OAuth login flow.

pub mod app;
pub mod db;
pub mod session;
