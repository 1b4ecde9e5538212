//! HTTP routing and OpenAPI documentation configuration.
//!
//! The root router merges the named sub-routers of each controller into one router. API
//! routes are collected into an OpenAPI document which is the contract for typed clients.
//! Swagger UI serves it at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router.
///
/// # Registered Endpoints
/// - `GET /api/auth/session` - Authorization URL plus current session
/// - `POST /api/auth/logout` - Invalidate the current session
/// - `GET /api/auth/user` - Current user
/// - `GET /auth/login/{provider}` - Redirect to the provider
/// - `GET /auth/callback/{provider}` - OAuth callback
/// - `GET|DELETE /api/user/sessions` - List or revoke the user's sessions
/// - `GET /` - Auth-gated shell
///
/// The OpenAPI document is served at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state).layer(session_layer);
/// ```
pub fn routes() -> Router<AppState> {
    let (api_routes, api) = api_routes().split_for_parts();

    Router::new()
        .merge(api_routes)
        .merge(controller::shell::routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

/// Builds the documented API routes along with their OpenAPI document.
pub fn api_routes() -> OpenApiRouter<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Heimdall", description = "Heimdall API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::user::USER_TAG, description = "User session API routes"),
    ))]
    struct ApiDoc;

    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(controller::auth::routes())
        .merge(controller::user::routes())
}
