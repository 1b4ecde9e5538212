//! OAuth identity providers.
//!
//! Each provider is an adapter behind the [`OAuthProvider`] trait, so the callback flow
//! only ever sees an authorization URL going out and a [`ProviderIdentity`] coming back.
//! The [`ProviderRegistry`] maps the `{provider}` path segment to its adapter.

pub mod discord;
pub mod github;

use std::sync::Arc;

use async_trait::async_trait;

use crate::server::error::provider::ProviderError;

/// A provider-issued authorization URL along with the CSRF state embedded in it.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    /// URL to redirect the user to
    pub url: String,
    /// CSRF state that must come back on the callback
    pub state: String,
}

/// Profile attributes imported into the local user at account creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderProfile {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: String,
}

/// The identity a provider vouched for after a successful code exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderIdentity {
    /// Stable user ID issued by the provider
    pub provider_user_id: String,
    pub profile: ProviderProfile,
}

/// An external OAuth identity provider.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Path segment identifying the provider, e.g. `github`.
    fn id(&self) -> &'static str;

    /// Human readable provider name for sign-in links.
    fn display_name(&self) -> &'static str;

    /// Creates a fresh authorization URL with a new random CSRF state.
    fn authorization_request(&self) -> AuthorizationRequest;

    /// Exchanges an authorization code for the identity of the user who granted it.
    ///
    /// # Returns
    /// - `Ok(ProviderIdentity)` - Code accepted and profile fetched
    /// - `Err(ProviderError::CodeExchange)` - Provider rejected the code
    /// - `Err(ProviderError::Profile)` - Profile request failed
    async fn exchange_code(&self, code: &str) -> Result<ProviderIdentity, ProviderError>;
}

/// The set of supported providers, in registration order.
///
/// The first registered provider is the primary one, used for the page-load
/// authorization URL.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn OAuthProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider, replacing any existing provider with the same ID.
    pub fn with_provider(mut self, provider: Arc<dyn OAuthProvider>) -> Self {
        match self.providers.iter().position(|p| p.id() == provider.id()) {
            Some(index) => self.providers[index] = provider,
            None => self.providers.push(provider),
        }
        self
    }

    /// Looks up a provider by its path segment.
    pub fn get(&self, id: &str) -> Option<Arc<dyn OAuthProvider>> {
        self.providers.iter().find(|p| p.id() == id).cloned()
    }

    /// The primary provider, if any are registered.
    pub fn primary(&self) -> Option<Arc<dyn OAuthProvider>> {
        self.providers.first().cloned()
    }

    /// Iterates over all providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn OAuthProvider>> {
        self.providers.iter()
    }
}
