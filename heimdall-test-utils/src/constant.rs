//! Placeholder OAuth credentials for test providers. Not real credentials.

/// Mock GitHub OAuth client ID.
pub static TEST_GITHUB_CLIENT_ID: &str = "github_client_id";

/// Mock GitHub OAuth client secret.
pub static TEST_GITHUB_CLIENT_SECRET: &str = "github_client_secret";

/// Callback URL registered for the mock GitHub OAuth app.
pub static TEST_GITHUB_CALLBACK_URL: &str = "http://localhost:8080/auth/callback/github";

/// Access token returned by the mock GitHub token endpoint.
pub static TEST_GITHUB_ACCESS_TOKEN: &str = "gho_test_access_token";

/// Mock Discord OAuth client ID.
pub static TEST_DISCORD_CLIENT_ID: &str = "discord_client_id";

/// Mock Discord OAuth client secret.
pub static TEST_DISCORD_CLIENT_SECRET: &str = "discord_client_secret";

/// Callback URL registered for the mock Discord OAuth app.
pub static TEST_DISCORD_CALLBACK_URL: &str = "http://localhost:8080/auth/callback/discord";

/// Access token returned by the mock Discord token endpoint.
pub static TEST_DISCORD_ACCESS_TOKEN: &str = "discord_test_access_token";
