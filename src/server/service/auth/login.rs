use tower_sessions::Session;

use crate::server::{
    error::Error,
    model::session::PendingAuthorization,
    provider::{AuthorizationRequest, OAuthProvider},
};

/// Requests an authorization URL from the provider and remembers its CSRF state in the
/// browser session for the callback.
pub async fn login_service(
    session: &Session,
    provider: &dyn OAuthProvider,
) -> Result<AuthorizationRequest, Error> {
    let request = provider.authorization_request();

    PendingAuthorization::insert(session, provider.id(), &request.state).await?;

    Ok(request)
}
