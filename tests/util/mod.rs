//! Helpers for building application state and requests on top of a `TestContext`.

use std::sync::Arc;

use axum::{
    body::to_bytes,
    http::{
        header::{COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;
use heimdall::server::{
    controller::util::cookie::SESSION_COOKIE_NAME,
    model::app::AppState,
    provider::{
        discord::{DiscordConfig, DiscordProvider},
        github::{GitHubConfig, GitHubProvider},
        ProviderRegistry,
    },
};
use heimdall_test_utils::{constant::*, TestContext};
use serde::de::DeserializeOwned;

/// Session lifetime used by test application state.
pub const TEST_SESSION_TTL_DAYS: i64 = 30;

/// Extension trait for TestContext to create AppState with GitHub and Discord providers pointed
/// at the mock server
pub trait TestContextExt {
    fn to_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn to_app_state(&self) -> AppState {
        let config = GitHubConfig::new(
            TEST_GITHUB_CLIENT_ID,
            TEST_GITHUB_CLIENT_SECRET,
            TEST_GITHUB_CALLBACK_URL,
        )
        .with_base_url(&self.server_url());
        let github = GitHubProvider::new(config).expect("Failed to build GitHub provider");

        let config = DiscordConfig::new(
            TEST_DISCORD_CLIENT_ID,
            TEST_DISCORD_CLIENT_SECRET,
            TEST_DISCORD_CALLBACK_URL,
        )
        .with_base_url(&self.server_url());
        let discord = DiscordProvider::new(config).expect("Failed to build Discord provider");

        AppState {
            db: self.db.clone(),
            providers: ProviderRegistry::new()
                .with_provider(Arc::new(github))
                .with_provider(Arc::new(discord)),
            pubsub: None,
            session_ttl: Duration::days(TEST_SESSION_TTL_DAYS),
        }
    }
}

/// A cookie jar as parsed from a request carrying the session token.
pub fn jar_with_session(token: &str) -> CookieJar {
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE_NAME, token)).unwrap(),
    );

    CookieJar::from_headers(&headers)
}

/// All Set-Cookie header values of a response.
pub fn set_cookies(resp: &Response) -> Vec<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The session token set by a response, if any.
pub fn session_token_from(resp: &Response) -> Option<String> {
    set_cookies(resp).into_iter().find_map(|cookie| {
        cookie
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix(&format!("{}=", SESSION_COOKIE_NAME)))
            .filter(|token| !token.is_empty())
            .map(|token| token.to_string())
    })
}

/// Whether a response clears the session cookie.
pub fn clears_session_cookie(resp: &Response) -> bool {
    set_cookies(resp).iter().any(|cookie| {
        cookie.starts_with(&format!("{}=", SESSION_COOKIE_NAME)) && cookie.contains("Max-Age=0")
    })
}

pub fn location(resp: &Response) -> Option<String> {
    resp.headers()
        .get(LOCATION)
        .map(|value| value.to_str().unwrap().to_string())
}

pub async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}
