use sea_orm::DatabaseConnection;

use crate::server::{
    error::Error,
    model::db::{SessionModel, UserModel},
    provider::OAuthProvider,
    service::{session::SessionService, user::UserService},
};

/// Result of a completed OAuth callback.
#[derive(Debug)]
pub struct CallbackOutcome {
    pub user: UserModel,
    pub session: SessionModel,
    /// Whether this login created the user
    pub created: bool,
}

pub struct CallbackService<'a> {
    db: &'a DatabaseConnection,
    session_service: SessionService<'a>,
}

impl<'a> CallbackService<'a> {
    /// Creates a new instance of [`CallbackService`]
    pub fn new(db: &'a DatabaseConnection, session_ttl: chrono::Duration) -> Self {
        Self {
            db,
            session_service: SessionService::new(db, session_ttl),
        }
    }

    /// Completes an OAuth callback.
    ///
    /// Exchanges the authorization code for the provider identity, resolves it to a user
    /// (creating one on first login) and opens a login session for that user.
    ///
    /// # Returns
    /// - `Ok(CallbackOutcome)` - User resolved and session created
    /// - `Err(Error::ProviderError)` - Provider rejected the code or profile request
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn handle_callback(
        &self,
        provider: &dyn OAuthProvider,
        code: &str,
    ) -> Result<CallbackOutcome, Error> {
        let identity = provider.exchange_code(code).await?;

        let (user, created) = UserService::new(self.db)
            .get_or_create_user(provider.id(), &identity)
            .await?;

        let session = self.session_service.create_session(user.id).await?;

        tracing::info!(
            user_id = user.id,
            provider = provider.id(),
            created,
            "User logged in"
        );

        Ok(CallbackOutcome {
            user,
            session,
            created,
        })
    }
}
