use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::ErrorDto,
        auth::{BootstrapDto, SessionDto},
        user::UserDto,
    },
    server::{
        controller::util::{
            cookie::{remove_session_cookie, session_token, set_session_cookies},
            csrf::validate_csrf,
            session::{get_session_from_cookie, require_session},
        },
        error::{auth::AuthError, Error},
        model::app::AppState,
        pubsub::{publish_event, AuthEvent},
        service::{
            auth::{callback::CallbackService, login::login_service},
            session::SessionService,
        },
    },
};

pub static AUTH_TAG: &str = "auth";

/// Query parameters the provider sends back to the callback.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code to exchange
    pub code: Option<String>,
    /// CSRF state echoed from the authorization URL
    pub state: Option<String>,
    /// Error reported by the provider, e.g. when the user denied access
    pub error: Option<String>,
}

/// Authentication routes.
pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(session_bootstrap))
        .routes(routes!(logout))
        .routes(routes!(get_user))
        .routes(routes!(login))
        .routes(routes!(callback))
}

/// Page-load bootstrap
///
/// Issues a fresh authorization URL for the primary provider and reports the session the
/// request's cookie refers to. A cookie that no longer refers to a valid session is removed.
///
/// # Responses
/// - 200 (Success): Authorization URL along with the current session and user, if any
/// - 500 (Internal Server Error): Session store or database failure
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Authorization URL and current session", body = BootstrapDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn session_bootstrap(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<(CookieJar, Json<BootstrapDto>), Error> {
    let provider = state.providers.primary().ok_or_else(|| {
        Error::InternalError("No OAuth providers are registered".to_string())
    })?;

    let request = login_service(&session, provider.as_ref()).await?;

    let current = get_session_from_cookie(&state, &jar).await?;

    let jar = match (&current, session_token(&jar)) {
        (None, Some(_)) => remove_session_cookie(jar),
        _ => jar,
    };

    let (session, user) = match current {
        Some((session, user)) => (
            Some(SessionDto {
                created_at: session.created_at,
                expires_at: session.expires_at,
                current: true,
            }),
            Some(UserDto::from(user)),
        ),
        None => (None, None),
    };

    Ok((
        jar,
        Json(BootstrapDto {
            provider: provider.id().to_string(),
            authorization_url: request.url,
            session,
            user,
        }),
    ))
}

/// Logs the user out
///
/// Invalidates the login session and clears the session cookie.
///
/// # Responses
/// - 303 (See Other): Session invalidated, redirect to `/`
/// - 401 (Unauthorized): Request does not carry a valid session, nothing is invalidated
/// - 500 (Internal Server Error): Database failure
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Logged out, redirect to /"),
        (status = 401, description = "No valid session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), Error> {
    let (session, user) = require_session(&state, &jar).await?;

    SessionService::new(&state.db, state.session_ttl)
        .invalidate_session(&session.id)
        .await?;

    tracing::info!(user_id = user.id, "User logged out");

    publish_event(
        state.pubsub.as_ref(),
        AuthEvent::LoggedOut { user_id: user.id },
    )
    .await;

    Ok((remove_session_cookie(jar), Redirect::to("/")))
}

/// Get the logged in user
///
/// # Responses
/// - 200 (Success): The user owning the request's session
/// - 401 (Unauthorized): Request does not carry a valid session
/// - 500 (Internal Server Error): Database failure
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "No valid session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<UserDto>, Error> {
    let (_, user) = require_session(&state, &jar).await?;

    Ok(Json(UserDto::from(user)))
}

/// Starts login with a provider
///
/// Redirects the user to the provider's authorization page, remembering the CSRF state for
/// the callback.
///
/// # Responses
/// - 307 (Temporary Redirect): Redirect to the provider
/// - 404 (Not Found): Provider is not supported
/// - 500 (Internal Server Error): Session store failure
#[utoipa::path(
    get,
    path = "/auth/login/{provider}",
    tag = AUTH_TAG,
    params(("provider" = String, Path, description = "Provider ID, e.g. github")),
    responses(
        (status = 307, description = "Redirect to the provider's authorization page"),
        (status = 404, description = "Provider not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Path(provider_id): Path<String>,
) -> Result<Redirect, Error> {
    let provider = state
        .providers
        .get(&provider_id)
        .ok_or(AuthError::UnknownProvider(provider_id))?;

    let request = login_service(&session, provider.as_ref()).await?;

    Ok(Redirect::temporary(&request.url))
}

/// OAuth callback the provider redirects to after the user granted access
///
/// Exchanges the code for the provider identity, creates the user on first login, opens a
/// login session and hands it to the client as a cookie.
///
/// # Responses
/// - 307 (Temporary Redirect): Logged in, redirect to `/` with the session cookie set
/// - 400 (Bad Request): Missing authorization code or CSRF state mismatch
/// - 404 (Not Found): Provider is not supported
/// - 500 (Internal Server Error): Provider rejected the code (message passed through), or
///   a database failure
#[utoipa::path(
    get,
    path = "/auth/callback/{provider}",
    tag = AUTH_TAG,
    params(
        ("provider" = String, Path, description = "Provider ID, e.g. github"),
        CallbackParams
    ),
    responses(
        (status = 307, description = "Logged in, redirect to /"),
        (status = 400, description = "Missing code or CSRF state mismatch", body = ErrorDto),
        (status = 404, description = "Provider not found", body = ErrorDto),
        (status = 500, description = "Provider or internal error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(provider_id): Path<String>,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), Error> {
    if let Some(error) = &params.error {
        tracing::debug!(
            provider = %provider_id,
            error = %error,
            "Provider reported an error on callback"
        );
    }

    let code = params.code.ok_or(AuthError::MissingCode)?;

    let provider = state
        .providers
        .get(&provider_id)
        .ok_or(AuthError::UnknownProvider(provider_id))?;

    validate_csrf(&session, provider.id(), params.state.as_deref()).await?;

    let outcome = CallbackService::new(&state.db, state.session_ttl)
        .handle_callback(provider.as_ref(), &code)
        .await?;

    if outcome.created {
        publish_event(
            state.pubsub.as_ref(),
            AuthEvent::UserCreated {
                user_id: outcome.user.id,
                provider: provider.id().to_string(),
            },
        )
        .await;
    }

    publish_event(
        state.pubsub.as_ref(),
        AuthEvent::LoggedIn {
            user_id: outcome.user.id,
            provider: provider.id().to_string(),
        },
    )
    .await;

    Ok((
        set_session_cookies(jar, &outcome.session),
        Redirect::temporary("/"),
    ))
}
