use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;
use heimdall::{
    model::user::UserDto,
    server::{controller::auth::get_user, service::session::SessionService},
};
use heimdall_test_utils::prelude::*;

use crate::{
    util::{jar_with_session, json_body},
    TestContextExt,
};

/// Expect 200 Success with the user owning the session
#[tokio::test]
async fn returns_user_for_session() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await?;
    let (user, _) = test.user().insert_user("github", "42", "alice").await?;
    let session = SessionService::new(&test.db, Duration::days(30))
        .create_session(user.id)
        .await
        .unwrap();

    let resp = get_user(State(test.to_app_state()), jar_with_session(&session.id))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: UserDto = json_body(resp).await;
    assert_eq!(body.id, user.id);
    assert_eq!(body.username, "alice");

    Ok(())
}

/// Expect 401 Unauthorized without a session
#[tokio::test]
async fn fails_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = get_user(State(test.to_app_state()), CookieJar::new())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
