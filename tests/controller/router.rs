//! End-to-end tests through the assembled router.

use axum::{
    body::Body,
    http::{header::COOKIE, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use entity::prelude::AuthUser;
use heimdall::server::{
    controller::util::cookie::SESSION_COOKIE_NAME, router, service::session::SessionService,
};
use heimdall_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{
    util::{location, session_token_from, text_body},
    TestContextExt,
};

fn app(test: &TestContext) -> Router {
    router::routes()
        .with_state(test.to_app_state())
        .layer(SessionManagerLayer::new(MemoryStore::default()))
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Expect the OpenAPI document to describe the aggregated API routes
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = app(&test)
        .oneshot(request(Method::GET, "/api/docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = serde_json::from_str(&text_body(resp).await)?;
    for path in [
        "/api/auth/session",
        "/api/auth/logout",
        "/api/auth/user",
        "/auth/login/{provider}",
        "/auth/callback/{provider}",
        "/api/user/sessions",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing path {}", path);
    }

    Ok(())
}

/// Expect 400 Bad Request from the callback route without a code
#[tokio::test]
async fn callback_without_code_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = app(&test)
        .oneshot(request(Method::GET, "/auth/callback/github"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect the example login to create a user, set the cookie and redirect to `/`, after
/// which the cookie opens the application shell
#[tokio::test]
async fn completes_login_flow() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_github_token_endpoint(1)
        .with_github_user_endpoint(
            factory::github_user(
                42,
                "alice",
                Some("Alice A"),
                Some("a@example.com"),
                "http://x/a.png",
            ),
            1,
        )
        .build()
        .await?;
    let app = app(&test);

    let resp = app
        .clone()
        .oneshot(request(Method::GET, "/auth/callback/github?code=abc123"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp).as_deref(), Some("/"));
    assert_eq!(AuthUser::find().count(&test.db).await?, 1);
    let token = session_token_from(&resp).unwrap();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(COOKIE, format!("{}={}", SESSION_COOKIE_NAME, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(text_body(resp).await.contains("Alice A"));

    test.assert_mocks();

    Ok(())
}

/// Expect logout through the router to invalidate the session
#[tokio::test]
async fn logs_out_through_router() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await?;
    let (user, _) = test.user().insert_user("github", "42", "alice").await?;
    let session_service = SessionService::new(&test.db, Duration::days(30));
    let session = session_service.create_session(user.id).await.unwrap();

    let resp = app(&test)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/logout")
                .header(COOKIE, format!("{}={}", SESSION_COOKIE_NAME, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(session_service
        .validate_session(&session.id)
        .await
        .unwrap()
        .is_none());

    Ok(())
}

/// Expect 401 Unauthorized from logout without a session
#[tokio::test]
async fn logout_without_session_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = app(&test)
        .oneshot(request(Method::POST, "/api/auth/logout"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
