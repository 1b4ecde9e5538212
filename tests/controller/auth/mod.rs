//! Tests for authentication controller endpoints.

mod callback;
mod session;
mod user;
