//! Error types for the Heimdall server application.
//!
//! This module provides the error handling system with specialized error types for each
//! domain (authentication, configuration, OAuth providers). All errors implement
//! `IntoResponse` for Axum HTTP responses and use `thiserror` for ergonomic definitions.

pub mod auth;
pub mod config;
pub mod provider;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, provider::ProviderError},
};

/// Main error type for the Heimdall server application.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// type so handlers can use `?` throughout. The `IntoResponse` implementation maps errors to
/// HTTP responses for API consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (missing code, unknown provider, CSRF, unauthenticated)
/// - Provider errors (code exchange or profile fetch rejected upstream)
/// - External library errors (database, session store, Redis, serialization)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (request could not be authenticated).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// OAuth provider error (upstream rejected or failed the exchange).
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// Internal error indicating a bug in Heimdall's code.
    #[error("Internal error with Heimdall's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Browser-session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis error (session store or pub/sub connection, command execution).
    #[error(transparent)]
    RedisError(#[from] fred::prelude::Error),
    /// Pub/sub server did not answer a publish in time.
    #[error("Timed out after {0:?} publishing to the pub/sub server")]
    PublishTimeout(std::time::Duration),
    /// Background job scheduler error (job registration, scheduler start).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// JSON serialization error.
    #[error(transparent)]
    SerializationError(#[from] serde_json::Error),
    /// IO error (binding the listener, serving).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// Domain errors carry their own mapping, everything else is an unclassified fault and
/// becomes a generic 500.
///
/// # Returns
/// - 400 Bad Request - Missing authorization code, CSRF mismatch
/// - 401 Unauthorized - No valid session for a protected action
/// - 404 Not Found - Unsupported OAuth provider
/// - 500 Internal Server Error - Provider failures (with message) and all other errors
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ProviderError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

/// Builds an error response with the provided status and message.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}
