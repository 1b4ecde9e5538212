use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Errors raised while authenticating a request or completing a login.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The OAuth callback was hit without an authorization code.
    #[error("OAuth callback is missing the authorization code")]
    MissingCode,
    /// The provider named in the path is not registered.
    #[error("Unsupported OAuth provider: {0}")]
    UnknownProvider(String),
    /// The callback state did not match the login started in this browser session.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,
    /// No valid session accompanies a request to a protected action.
    #[error("Request does not carry a valid session")]
    Unauthenticated,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingCode => {
                error_response(StatusCode::BAD_REQUEST, "Missing authorization code")
            }
            Self::UnknownProvider(_) => error_response(StatusCode::NOT_FOUND, "Provider not found"),
            Self::CsrfValidationFailed => error_response(
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::Unauthenticated => error_response(StatusCode::UNAUTHORIZED, "Unauthorized"),
        }
    }
}
