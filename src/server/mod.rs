//! Server application core modules.
//!
//! This module contains all server-side functionality for Heimdall: HTTP routing, the
//! OAuth provider adapters, database repositories for users/keys/sessions, the service
//! layer tying them together, periodic cleanup of expired sessions, and publishing of
//! authentication events over pub/sub.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod provider;
pub mod pubsub;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
