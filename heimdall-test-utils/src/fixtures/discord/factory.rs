//! Factory functions for Discord API payloads.

use serde_json::{json, Value};

use crate::constant::TEST_DISCORD_ACCESS_TOKEN;

/// Create a `GET /users/@me` response body.
///
/// # Arguments
/// - `id` - Snowflake user ID
/// - `username` - Unique Discord username
/// - `global_name` - Display name, `null` when `None`
/// - `email` - Verified email, `null` when `None`
/// - `avatar` - Avatar hash, `null` for the default avatar
pub fn discord_user(
    id: &str,
    username: &str,
    global_name: Option<&str>,
    email: Option<&str>,
    avatar: Option<&str>,
) -> Value {
    json!({
        "id": id,
        "username": username,
        "discriminator": "0",
        "global_name": global_name,
        "avatar": avatar,
        "email": email,
        "verified": email.is_some(),
        "locale": "en-US",
        "mfa_enabled": false
    })
}

/// Create a successful token endpoint response body.
pub fn discord_token() -> Value {
    json!({
        "access_token": TEST_DISCORD_ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 604800,
        "refresh_token": "discord_test_refresh_token",
        "scope": "identify email"
    })
}

/// Create the body Discord returns, with status 400, for a rejected code.
pub fn discord_token_error(error: &str) -> Value {
    json!({
        "error": error,
        "error_description": "Invalid \"code\" in request."
    })
}
