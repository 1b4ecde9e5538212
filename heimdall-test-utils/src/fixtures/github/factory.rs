//! Factory functions for GitHub API payloads.

use serde_json::{json, Value};

use crate::constant::TEST_GITHUB_ACCESS_TOKEN;

/// Create a `GET /user` response body.
///
/// # Arguments
/// - `id` - Numeric GitHub user ID
/// - `login` - GitHub username
/// - `name` - Display name, `null` when `None`
/// - `email` - Public email, `null` when `None`
/// - `avatar_url` - Profile picture URL
pub fn github_user(
    id: i64,
    login: &str,
    name: Option<&str>,
    email: Option<&str>,
    avatar_url: &str,
) -> Value {
    json!({
        "id": id,
        "login": login,
        "name": name,
        "email": email,
        "avatar_url": avatar_url,
        "type": "User",
        "site_admin": false
    })
}

/// Create a successful token endpoint response body.
pub fn github_token() -> Value {
    json!({
        "access_token": TEST_GITHUB_ACCESS_TOKEN,
        "token_type": "bearer",
        "scope": "read:user"
    })
}

/// Create the body GitHub returns, with status 200, for a rejected code.
pub fn github_token_error(error: &str) -> Value {
    json!({
        "error": error,
        "error_description": "The code passed is incorrect or expired.",
        "error_uri": "https://docs.github.com/apps/managing-oauth-apps/troubleshooting-oauth-app-access-token-request-errors"
    })
}
