use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::session::PendingAuthorization,
};

/// Validates the callback state against the logins started in this browser session.
///
/// A state must have been issued to this browser for the same provider, and is consumed by
/// the check. A callback without a state only passes when no login is pending.
pub async fn validate_csrf(
    session: &Session,
    provider: &str,
    csrf_state: Option<&str>,
) -> Result<(), Error> {
    let valid = match csrf_state {
        Some(csrf_state) => PendingAuthorization::take(session, csrf_state)
            .await?
            .is_some_and(|pending| pending.provider == provider),
        None => PendingAuthorization::list(session).await?.is_empty(),
    };

    if valid {
        return Ok(());
    }

    Err(Error::AuthError(AuthError::CsrfValidationFailed))
}
