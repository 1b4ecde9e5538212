use axum_extra::extract::cookie::CookieJar;

use crate::server::{
    controller::util::cookie::session_token,
    error::{auth::AuthError, Error},
    model::{
        app::AppState,
        db::{SessionModel, UserModel},
    },
    service::session::SessionService,
};

/// Validates the login session referenced by the request's session cookie.
///
/// # Returns
/// - `Ok(Some((session, user)))` - Cookie carries a valid session
/// - `Ok(None)` - No cookie, or the session is unknown or expired
/// - `Err(Error)` - Database failure
pub async fn get_session_from_cookie(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<(SessionModel, UserModel)>, Error> {
    let Some(token) = session_token(jar) else {
        return Ok(None);
    };

    SessionService::new(&state.db, state.session_ttl)
        .validate_session(&token)
        .await
}

/// Like [`get_session_from_cookie`] but treats a missing session as unauthenticated.
pub async fn require_session(
    state: &AppState,
    jar: &CookieJar,
) -> Result<(SessionModel, UserModel), Error> {
    get_session_from_cookie(state, jar)
        .await?
        .ok_or(Error::AuthError(AuthError::Unauthenticated))
}
