//! Authentication service layer.
//!
//! Services for the two halves of the OAuth flow: handing out an authorization URL with its
//! CSRF state, and completing the provider callback into a user and login session.

pub mod callback;
pub mod login;
