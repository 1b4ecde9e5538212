use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;
use entity::prelude::AuthUser;
use heimdall::server::{
    controller::auth::{callback, CallbackParams},
    model::session::PendingAuthorization,
    service::session::SessionService,
};
use heimdall_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::{
    util::{json_body, location, session_token_from},
    TestContextExt,
};

fn params(code: Option<&str>, state: Option<&str>) -> Query<CallbackParams> {
    Query(CallbackParams {
        code: code.map(str::to_string),
        state: state.map(str::to_string),
        error: None,
    })
}

fn alice() -> serde_json::Value {
    factory::github_user(
        42,
        "alice",
        Some("Alice A"),
        Some("a@example.com"),
        "http://x/a.png",
    )
}

/// Expect 400 Bad Request and never a redirect when the code is missing
#[tokio::test]
async fn fails_for_missing_code() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(None, None),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(location(&resp).is_none());
    assert_eq!(AuthUser::find().count(&test.db).await?, 0);

    Ok(())
}

/// Expect the missing code to be reported before the unknown provider
#[tokio::test]
async fn checks_code_before_provider() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("gitlab".to_string()),
        params(None, None),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 404 Not Found for an unsupported provider
#[tokio::test]
async fn fails_for_unknown_provider() -> Result<(), TestError> {
    let test = TestBuilder::new().with_auth_tables().build().await?;

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("gitlab".to_string()),
        params(Some("abc123"), None),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect one new user with the profile attributes, a valid session cookie and a
/// 307 Temporary Redirect to `/` on first login
#[tokio::test]
async fn creates_user_on_first_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_github_token_endpoint(1)
        .with_github_user_endpoint(alice(), 1)
        .build()
        .await?;
    let state = test.to_app_state();

    let resp = callback(
        State(state.clone()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(Some("abc123"), None),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp).as_deref(), Some("/"));

    let users = AuthUser::find().all(&test.db).await?;
    assert_eq!(users.len(), 1);
    let user = &users[0];
    assert_eq!(user.username, "alice");
    assert_eq!(user.name.as_deref(), Some("Alice A"));
    assert_eq!(user.email.as_deref(), Some("a@example.com"));
    assert_eq!(user.profile_picture, "http://x/a.png");

    let token = session_token_from(&resp).expect("session cookie was not set");
    let validated = SessionService::new(&test.db, Duration::days(30))
        .validate_session(&token)
        .await
        .unwrap();
    assert_eq!(validated.map(|(_, u)| u.id), Some(user.id));

    test.assert_mocks();

    Ok(())
}

/// Expect no duplicate user for a returning identity
#[tokio::test]
async fn reuses_user_on_returning_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_user("github", "42", "alice")
        .with_github_token_endpoint(1)
        .with_github_user_endpoint(alice(), 1)
        .build()
        .await?;

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(Some("abc123"), None),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(session_token_from(&resp).is_some());
    assert_eq!(AuthUser::find().count(&test.db).await?, 1);

    Ok(())
}

/// Expect 500 carrying the provider's message when the code is rejected
#[tokio::test]
async fn fails_with_provider_message() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_github_token_error_endpoint("bad_verification_code", 1)
        .build()
        .await?;

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(Some("expired"), None),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(session_token_from(&resp).is_none());

    let body: serde_json::Value = json_body(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("bad_verification_code"));

    test.assert_mocks();

    Ok(())
}

/// Expect 400 Bad Request without contacting the provider when the state doesn't match
/// the login started in this browser session
#[tokio::test]
async fn fails_for_csrf_mismatch() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_github_token_endpoint(0)
        .build()
        .await?;
    PendingAuthorization::insert(&test.session, "github", "expected")
        .await
        .unwrap();

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(Some("abc123"), Some("forged")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(AuthUser::find().count(&test.db).await?, 0);

    test.assert_mocks();

    Ok(())
}

/// Expect login to succeed when the state matches the pending login
#[tokio::test]
async fn accepts_matching_csrf_state() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_github_token_endpoint(1)
        .with_github_user_endpoint(alice(), 1)
        .build()
        .await?;
    PendingAuthorization::insert(&test.session, "github", "expected")
        .await
        .unwrap();

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(Some("abc123"), Some("expected")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    Ok(())
}

/// Expect a login started before another authorization URL was issued to still complete
#[tokio::test]
async fn accepts_state_of_earlier_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_github_token_endpoint(1)
        .with_github_user_endpoint(alice(), 1)
        .build()
        .await?;
    PendingAuthorization::insert(&test.session, "github", "first-tab")
        .await
        .unwrap();
    PendingAuthorization::insert(&test.session, "github", "second-tab")
        .await
        .unwrap();

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(Some("abc123"), Some("first-tab")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let pending = PendingAuthorization::list(&test.session).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].state, "second-tab");

    Ok(())
}

/// Expect 400 Bad Request for a state that was never issued to this browser session
#[tokio::test]
async fn fails_for_state_not_issued_to_browser() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_github_token_endpoint(0)
        .build()
        .await?;

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("github".to_string()),
        params(Some("abc123"), Some("attacker-state")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(AuthUser::find().count(&test.db).await?, 0);

    test.assert_mocks();

    Ok(())
}

/// Expect a Discord login to create the user from the Discord profile
#[tokio::test]
async fn creates_user_on_discord_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_discord_token_endpoint(1)
        .with_discord_user_endpoint(
            discord_factory::discord_user(
                "80351110224678912",
                "nelly",
                Some("Nelly"),
                Some("nelly@example.com"),
                Some("8342729096ea3675442027381ff50dfe"),
            ),
            1,
        )
        .build()
        .await?;
    PendingAuthorization::insert(&test.session, "discord", "discord-state")
        .await
        .unwrap();

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("discord".to_string()),
        params(Some("abc123"), Some("discord-state")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(session_token_from(&resp).is_some());

    let users = AuthUser::find().all(&test.db).await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "nelly");
    assert_eq!(users[0].name.as_deref(), Some("Nelly"));
    assert_eq!(users[0].email.as_deref(), Some("nelly@example.com"));
    assert_eq!(
        users[0].profile_picture,
        "https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png"
    );

    Ok(())
}

/// Expect a GitHub state to be refused on the Discord callback
#[tokio::test]
async fn fails_for_state_issued_to_other_provider() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_discord_token_endpoint(0)
        .build()
        .await?;
    PendingAuthorization::insert(&test.session, "github", "github-state")
        .await
        .unwrap();

    let resp = callback(
        State(test.to_app_state()),
        test.session.clone(),
        CookieJar::new(),
        Path("discord".to_string()),
        params(Some("abc123"), Some("github-state")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(AuthUser::find().count(&test.db).await?, 0);

    Ok(())
}
