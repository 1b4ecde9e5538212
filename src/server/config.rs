//! Environment configuration.
//!
//! All secrets (OAuth client credentials, pub/sub API key) are read from the environment at
//! process start; none are compiled into the binary.

use chrono::Duration;

use crate::server::error::config::ConfigError;

/// Default listen address when `BIND_ADDRESS` is unset.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default session lifetime in days when `SESSION_EXPIRY_DAYS` is unset.
pub const DEFAULT_SESSION_EXPIRY_DAYS: i64 = 30;

/// Longest accepted session lifetime in days.
pub const MAX_SESSION_EXPIRY_DAYS: i64 = 3650;

/// OAuth app credentials for an optional provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URL registered with the OAuth app
    pub callback_url: String,
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// sea-orm connection URL
    pub database_url: String,
    /// Valkey/Redis URL backing the browser-session store
    pub valkey_url: String,
    /// GitHub OAuth app client ID
    pub github_client_id: String,
    /// GitHub OAuth app client secret
    pub github_client_secret: String,
    /// Redirect URL registered with the GitHub OAuth app
    pub github_callback_url: String,
    /// Discord OAuth app, the provider is only registered when configured
    pub discord: Option<OAuthClientConfig>,
    /// Lifetime of a login session
    pub session_ttl: Duration,
    /// Pub/sub server URL, publishing is disabled when unset
    pub pubsub_url: Option<String>,
    /// Pub/sub API key, used as the connection password
    pub pubsub_api_key: Option<String>,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable failed validation
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| -> Result<String, ConfigError> {
            lookup(var)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };
        let optional = |var: &str| lookup(var).filter(|value| !value.is_empty());

        let github_callback_url = required("GITHUB_CALLBACK_URL")?;
        if !github_callback_url.ends_with("/auth/callback/github") {
            return Err(ConfigError::InvalidEnvValue {
                var: "GITHUB_CALLBACK_URL".to_string(),
                reason: "must end with /auth/callback/github".to_string(),
            });
        }

        let discord = match (
            optional("DISCORD_CLIENT_ID"),
            optional("DISCORD_CLIENT_SECRET"),
            optional("DISCORD_CALLBACK_URL"),
        ) {
            (None, None, None) => None,
            _ => {
                let callback_url = required("DISCORD_CALLBACK_URL")?;
                if !callback_url.ends_with("/auth/callback/discord") {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "DISCORD_CALLBACK_URL".to_string(),
                        reason: "must end with /auth/callback/discord".to_string(),
                    });
                }

                Some(OAuthClientConfig {
                    client_id: required("DISCORD_CLIENT_ID")?,
                    client_secret: required("DISCORD_CLIENT_SECRET")?,
                    callback_url,
                })
            }
        };

        let session_expiry_days = match optional("SESSION_EXPIRY_DAYS") {
            None => DEFAULT_SESSION_EXPIRY_DAYS,
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|days| (1..=MAX_SESSION_EXPIRY_DAYS).contains(days))
                .ok_or_else(|| ConfigError::InvalidEnvValue {
                    var: "SESSION_EXPIRY_DAYS".to_string(),
                    reason: format!(
                        "expected an integer from 1 to {}, got {:?}",
                        MAX_SESSION_EXPIRY_DAYS, value
                    ),
                })?,
        };

        let session_ttl =
            Duration::try_days(session_expiry_days).ok_or_else(|| ConfigError::InvalidEnvValue {
                var: "SESSION_EXPIRY_DAYS".to_string(),
                reason: "out of range".to_string(),
            })?;

        Ok(Self {
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            github_client_id: required("GITHUB_CLIENT_ID")?,
            github_client_secret: required("GITHUB_CLIENT_SECRET")?,
            github_callback_url,
            discord,
            session_ttl,
            pubsub_url: optional("PUBSUB_URL"),
            pubsub_api_key: optional("PUBSUB_API_KEY"),
        })
    }
}
