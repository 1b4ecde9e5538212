use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{api::ErrorDto, auth::SessionDto},
    server::{
        controller::util::{cookie::remove_session_cookie, session::require_session},
        error::Error,
        model::app::AppState,
        pubsub::{publish_event, AuthEvent},
        service::session::SessionService,
    },
};

pub static USER_TAG: &str = "user";

/// User session management routes.
pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_user_sessions, revoke_user_sessions))
}

/// Get the active login sessions of the logged in user
#[utoipa::path(
    get,
    path = "/api/user/sessions",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Active sessions, newest first", body = Vec<SessionDto>),
        (status = 401, description = "No valid session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_sessions(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<SessionDto>>, Error> {
    let (current, user) = require_session(&state, &jar).await?;

    let sessions = SessionService::new(&state.db, state.session_ttl)
        .get_active_sessions(user.id)
        .await?
        .into_iter()
        .map(|session| SessionDto {
            created_at: session.created_at,
            expires_at: session.expires_at,
            current: session.id == current.id,
        })
        .collect();

    Ok(Json(sessions))
}

/// Sign out everywhere
///
/// Invalidates every login session of the logged in user, including the current one.
#[utoipa::path(
    delete,
    path = "/api/user/sessions",
    tag = USER_TAG,
    responses(
        (status = 204, description = "All sessions invalidated"),
        (status = 401, description = "No valid session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn revoke_user_sessions(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), Error> {
    let (_, user) = require_session(&state, &jar).await?;

    let removed = SessionService::new(&state.db, state.session_ttl)
        .invalidate_user_sessions(user.id)
        .await?;

    tracing::info!(user_id = user.id, removed, "Invalidated all sessions of user");

    publish_event(
        state.pubsub.as_ref(),
        AuthEvent::LoggedOut { user_id: user.id },
    )
    .await;

    Ok((remove_session_cookie(jar), StatusCode::NO_CONTENT))
}
