//! Discord OAuth adapter.
//!
//! Uses Discord's authorization code grant with the `identify` and `email` scopes and reads
//! the profile from `GET /users/@me`. Avatars are hashes which are turned into CDN URLs, with
//! Discord's default avatar for users who never set one.

use std::time::Duration;

use async_trait::async_trait;
use oauth2::{
    basic::{BasicClient, BasicErrorResponse},
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    HttpClientError, RedirectUrl, RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::server::{
    error::provider::ProviderError,
    provider::{AuthorizationRequest, OAuthProvider, ProviderIdentity, ProviderProfile},
};

/// Path segment and provider ID for Discord.
pub const DISCORD_PROVIDER_ID: &str = "discord";

static DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
static DISCORD_API_URL: &str = "https://discord.com/api";
static DISCORD_CDN_URL: &str = "https://cdn.discordapp.com";
static DISCORD_SCOPES: [&str; 2] = ["identify", "email"];

/// Upper bound for any single request made to Discord.
pub const DISCORD_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type DiscordOAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Credentials and endpoints for the Discord adapter.
#[derive(Clone, Debug)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URL registered with the Discord application
    pub callback_url: String,
    pub auth_url: String,
    /// REST API base URL, the token endpoint lives at `{api_url}/oauth2/token`
    pub api_url: String,
    /// Base URL avatar links point at
    pub cdn_url: String,
}

impl DiscordConfig {
    /// Creates a config targeting discord.com.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: callback_url.into(),
            auth_url: DISCORD_AUTH_URL.to_string(),
            api_url: DISCORD_API_URL.to_string(),
            cdn_url: DISCORD_CDN_URL.to_string(),
        }
    }

    /// Points the OAuth and API endpoints at `base_url`, using Discord's path layout.
    ///
    /// Avatar links keep pointing at the CDN.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.auth_url = format!("{}/oauth2/authorize", base_url);
        self.api_url = format!("{}/api", base_url);
        self
    }
}

/// Subset of the `GET /users/@me` response that is imported.
#[derive(Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    #[serde(default)]
    discriminator: Option<String>,
    #[serde(default)]
    global_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

impl DiscordUser {
    /// CDN URL of the user's avatar, or of the default avatar Discord assigns.
    fn avatar_url(&self, cdn_url: &str) -> String {
        match &self.avatar {
            Some(hash) => {
                let extension = if hash.starts_with("a_") { "gif" } else { "png" };

                format!("{}/avatars/{}/{}.{}", cdn_url, self.id, hash, extension)
            }
            None => format!(
                "{}/embed/avatars/{}.png",
                cdn_url,
                self.default_avatar_index()
            ),
        }
    }

    /// Legacy accounts pick by discriminator, migrated accounts by snowflake.
    fn default_avatar_index(&self) -> u64 {
        match self
            .discriminator
            .as_deref()
            .and_then(|d| d.parse::<u64>().ok())
        {
            Some(discriminator) if discriminator != 0 => discriminator % 5,
            _ => self.id.parse::<u64>().map(|id| (id >> 22) % 6).unwrap_or(0),
        }
    }
}

/// Discord implementation of [`OAuthProvider`].
pub struct DiscordProvider {
    oauth: DiscordOAuthClient,
    http: reqwest::Client,
    api_url: String,
    cdn_url: String,
}

impl DiscordProvider {
    /// Builds the adapter from its config.
    ///
    /// # Returns
    /// - `Ok(DiscordProvider)` - Adapter ready to use
    /// - `Err(ProviderError::InvalidEndpoint)` - One of the configured URLs failed to parse
    /// - `Err(ProviderError::HttpClient)` - The HTTP client could not be built
    pub fn new(config: DiscordConfig) -> Result<Self, ProviderError> {
        let api_url = config.api_url.trim_end_matches('/').to_string();

        let oauth = BasicClient::new(ClientId::new(config.client_id))
            .set_client_secret(ClientSecret::new(config.client_secret))
            .set_auth_uri(AuthUrl::new(config.auth_url)?)
            .set_token_uri(TokenUrl::new(format!("{}/oauth2/token", api_url))?)
            .set_redirect_uri(RedirectUrl::new(config.callback_url)?);

        // Token exchange must not follow redirects
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(DISCORD_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            oauth,
            http,
            api_url,
            cdn_url: config.cdn_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, reqwest::Error> {
        self.http
            .get(format!("{}/users/@me", self.api_url))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await
    }
}

#[async_trait]
impl OAuthProvider for DiscordProvider {
    fn id(&self) -> &'static str {
        DISCORD_PROVIDER_ID
    }

    fn display_name(&self) -> &'static str {
        "Discord"
    }

    fn authorization_request(&self) -> AuthorizationRequest {
        let (url, csrf) = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_scopes(DISCORD_SCOPES.iter().map(|s| Scope::new(s.to_string())))
            .url();

        AuthorizationRequest {
            url: url.to_string(),
            state: csrf.secret().clone(),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderIdentity, ProviderError> {
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|err| ProviderError::CodeExchange {
                provider: DISCORD_PROVIDER_ID,
                message: describe_token_error(err),
            })?;

        let user = self
            .fetch_user(token.access_token().secret())
            .await
            .map_err(|err| ProviderError::Profile {
                provider: DISCORD_PROVIDER_ID,
                message: err.to_string(),
            })?;

        let profile_picture = user.avatar_url(&self.cdn_url);

        Ok(ProviderIdentity {
            provider_user_id: user.id,
            profile: ProviderProfile {
                username: user.username,
                name: user.global_name,
                email: user.email,
                profile_picture,
            },
        })
    }
}

fn describe_token_error(
    err: RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>,
) -> String {
    match err {
        RequestTokenError::ServerResponse(response) => response.to_string(),
        RequestTokenError::Parse(err, _) => err.to_string(),
        RequestTokenError::Request(err) => err.to_string(),
        RequestTokenError::Other(message) => message,
    }
}
