//! Tests for the auth-gated shell.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;
use heimdall::server::{controller::shell::index, service::session::SessionService};
use heimdall_test_utils::prelude::*;

use crate::{
    util::{clears_session_cookie, jar_with_session, text_body},
    TestContextExt,
};

/// Expect only the sign-in view for an unauthenticated visitor
#[tokio::test]
async fn renders_sign_in_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = index(State(test.to_app_state()), CookieJar::new())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = text_body(resp).await;
    assert!(html.contains(r#"<a href="/auth/login/github">Sign in with GitHub</a>"#));
    assert!(!html.contains(r#"id="app""#));
    assert!(!html.contains("/api/auth/logout"));

    Ok(())
}

/// Expect the username, sign-out form, and application content for a valid session
#[tokio::test]
async fn renders_app_with_session() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await?;
    let (user, _) = test.user().insert_user("github", "42", "alice").await?;
    let session = SessionService::new(&test.db, Duration::days(30))
        .create_session(user.id)
        .await
        .unwrap();

    let resp = index(State(test.to_app_state()), jar_with_session(&session.id))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = text_body(resp).await;
    assert!(html.contains("alice"));
    assert!(html.contains(r#"<form method="post" action="/api/auth/logout">"#));
    assert!(html.contains(r#"id="app""#));
    assert!(!html.contains("Sign in with"));

    Ok(())
}

/// Expect the sign-in view and a cleared cookie for a stale session token
#[tokio::test]
async fn renders_sign_in_for_stale_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = index(State(test.to_app_state()), jar_with_session("stale"))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(clears_session_cookie(&resp));
    let html = text_body(resp).await;
    assert!(html.contains("Sign in with GitHub"));

    Ok(())
}
