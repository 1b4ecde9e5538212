//! GitHub OAuth adapter.
//!
//! Authorization goes through GitHub's web application flow; the profile comes from the
//! REST API's `GET /user`. Endpoints default to github.com and can be pointed elsewhere
//! (GitHub Enterprise, mock servers in tests) through [`GitHubConfig::with_base_url`].

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

/// Path segment and provider ID for GitHub.
pub const GITHUB_PROVIDER_ID: &str = "github";

static GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
static GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
static GITHUB_API_URL: &str = "https://api.github.com";
static GITHUB_SCOPE: &str = "read:user";

/// Upper bound for any single request made to GitHub.
pub const GITHUB_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type GitHubOAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Credentials and endpoints for the GitHub adapter.
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    /// OAuth app client ID
    pub client_id: String,
    /// OAuth app client secret
    pub client_secret: String,
    /// Redirect URL registered with the OAuth app
    pub callback_url: String,
    /// Authorization endpoint
    pub auth_url: String,
    /// Token endpoint
    pub token_url: String,
    /// REST API base URL
    pub api_url: String,
    /// User-Agent header, required by the GitHub API
    pub user_agent: String,
}

impl GitHubConfig {
    /// Creates a config targeting github.com.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: callback_url.into(),
            auth_url: GITHUB_AUTH_URL.to_string(),
            token_url: GITHUB_TOKEN_URL.to_string(),
            api_url: GITHUB_API_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }

    /// Points every endpoint at `base_url`, using GitHub's path layout.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.auth_url = format!("{}/login/oauth/authorize", base_url);
        self.token_url = format!("{}/login/oauth/access_token", base_url);
        self.api_url = base_url.to_string();
        self
    }
}

/// Subset of the `GET /user` response that is imported.
#[derive(Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: String,
}

/// GitHub implementation of [`OAuthProvider`].
pub struct GitHubProvider {
    oauth: GitHubOAuthClient,
    http: reqwest::Client,
    api_url: String,
}

impl GitHubProvider {
    /// Builds the adapter from its config.
    ///
    /// # Returns
    /// - `Ok(GitHubProvider)` - Adapter ready to use
    /// - `Err(ProviderError::InvalidEndpoint)` - One of the configured URLs failed to parse
    /// - `Err(ProviderError::HttpClient)` - The HTTP client could not be built
    pub fn new(config: GitHubConfig) -> Result<Self, ProviderError> {
        let oauth = BasicClient::new(ClientId::new(config.client_id))
            .set_client_secret(ClientSecret::new(config.client_secret))
            .set_auth_uri(AuthUrl::new(config.auth_url)?)
            .set_token_uri(TokenUrl::new(config.token_url)?)
            .set_redirect_uri(RedirectUrl::new(config.callback_url)?);

        // Token exchange must not follow redirects
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(GITHUB_REQUEST_TIMEOUT)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            oauth,
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_user(&self, access_token: &str) -> Result<GitHubUser, reqwest::Error> {
        self.http
            .get(format!("{}/user", self.api_url))
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json::<GitHubUser>()
            .await
    }
}

#[async_trait]
impl OAuthProvider for GitHubProvider {
    fn id(&self) -> &'static str {
        GITHUB_PROVIDER_ID
    }

    fn display_name(&self) -> &'static str {
        "GitHub"
    }

    fn authorization_request(&self) -> AuthorizationRequest {
        let (url, csrf) = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(GITHUB_SCOPE.to_string()))
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
                provider: GITHUB_PROVIDER_ID,
                message: describe_token_error(err),
            })?;

        let user = self
            .fetch_user(token.access_token().secret())
            .await
            .map_err(|err| ProviderError::Profile {
                provider: GITHUB_PROVIDER_ID,
                message: err.to_string(),
            })?;

        Ok(ProviderIdentity {
            provider_user_id: user.id.to_string(),
            profile: ProviderProfile {
                username: user.login,
                name: user.name,
                email: user.email,
                profile_picture: user.avatar_url,
            },
        })
    }
}

/// GitHub answers a rejected code with `200 OK` and an OAuth error body, which the oauth2
/// crate reports as a parse failure; recover the provider's error from the body.
fn describe_token_error(
    err: RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>,
) -> String {
    match err {
        RequestTokenError::ServerResponse(response) => response.to_string(),
        RequestTokenError::Parse(_, body) => serde_json::from_slice::<BasicErrorResponse>(&body)
            .map(|response| response.to_string())
            .unwrap_or_else(|_| "unexpected token response".to_string()),
        RequestTokenError::Request(err) => err.to_string(),
        RequestTokenError::Other(message) => message,
    }
}
