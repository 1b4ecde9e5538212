use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use heimdall::{
    model::auth::BootstrapDto,
    server::{
        controller::auth::session_bootstrap, model::session::PendingAuthorization,
        service::session::SessionService,
    },
};
use heimdall_test_utils::prelude::*;

use crate::{
    util::{clears_session_cookie, jar_with_session, json_body},
    TestContextExt,
};

/// Expect an authorization URL, no session, and the CSRF state remembered in session
#[tokio::test]
async fn returns_authorization_url_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = session_bootstrap(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: BootstrapDto = json_body(resp).await;
    assert_eq!(body.provider, "github");
    assert!(body
        .authorization_url
        .starts_with(&format!("{}/login/oauth/authorize?", test.server_url())));
    assert!(body.session.is_none());
    assert!(body.user.is_none());

    let pending = PendingAuthorization::list(&test.session).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(body
        .authorization_url
        .contains(&format!("state={}", pending[0].state)));

    Ok(())
}

/// Expect the current session and user for a valid cookie
#[tokio::test]
async fn returns_current_session_and_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await?;
    let (user, _) = test.user().insert_user("github", "42", "alice").await?;
    let session = SessionService::new(&test.db, Duration::days(30))
        .create_session(user.id)
        .await
        .unwrap();

    let resp = session_bootstrap(
        State(test.to_app_state()),
        test.session.clone(),
        jar_with_session(&session.id),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!clears_session_cookie(&resp));

    let body: BootstrapDto = json_body(resp).await;
    let session_dto = body.session.unwrap();
    assert!(session_dto.current);
    assert_eq!(session_dto.expires_at, session.expires_at);
    assert_eq!(body.user.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Expect an expired session's cookie to be removed
#[tokio::test]
async fn removes_cookie_of_expired_session() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await?;
    let (user, _) = test.user().insert_user("github", "42", "alice").await?;
    test.auth()
        .insert_session(user.id, "expired", Utc::now().naive_utc() - Duration::minutes(1))
        .await?;

    let resp = session_bootstrap(
        State(test.to_app_state()),
        test.session.clone(),
        jar_with_session("expired"),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(clears_session_cookie(&resp));

    let body: BootstrapDto = json_body(resp).await;
    assert!(body.session.is_none());
    assert!(body.user.is_none());

    Ok(())
}

/// Expect 500 Internal Server Error when session validation hits a database failure
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = session_bootstrap(
        State(test.to_app_state()),
        test.session.clone(),
        jar_with_session("token"),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
