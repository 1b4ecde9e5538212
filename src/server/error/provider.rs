use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

/// Errors raised by an OAuth provider adapter.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider rejected the authorization code or the token exchange failed.
    #[error("Failed to exchange authorization code with {provider}: {message}")]
    CodeExchange {
        /// Provider ID
        provider: &'static str,
        /// Message reported by the provider
        message: String,
    },
    /// The provider accepted the code but the user profile could not be fetched.
    #[error("Failed to fetch user profile from {provider}: {message}")]
    Profile {
        /// Provider ID
        provider: &'static str,
        /// Message reported by the provider
        message: String,
    },
    /// A configured provider endpoint is not a valid URL.
    #[error("Invalid OAuth endpoint URL: {0}")]
    InvalidEndpoint(#[from] oauth2::url::ParseError),
    /// The HTTP client used for provider requests could not be built.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),
}

/// Upstream auth failures surface their message; the message comes from the provider's
/// response and never contains client secrets.
impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        match self {
            Self::CodeExchange { .. } | Self::Profile { .. } => {
                tracing::warn!("{}", self);

                error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
