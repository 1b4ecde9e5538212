use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use rand::RngCore;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::session::SessionRepository,
    error::Error,
    model::db::{SessionModel, UserModel},
};

/// Number of random bytes in a session token.
const SESSION_TOKEN_BYTES: usize = 32;

/// Generates an opaque session token from a cryptographically secure RNG.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

/// Service for the lifecycle of login sessions.
///
/// A login session is a database row whose ID is the token carried by the session cookie.
pub struct SessionService<'a> {
    db: &'a DatabaseConnection,
    ttl: Duration,
}

impl<'a> SessionService<'a> {
    /// Creates a new instance of [`SessionService`]
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    /// - `ttl` - Lifetime of sessions created by this service
    pub fn new(db: &'a DatabaseConnection, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    /// Creates a session for the user expiring after the configured lifetime.
    pub async fn create_session(&self, user_id: i32) -> Result<SessionModel, Error> {
        let token = generate_session_token();
        let expires_at = Utc::now()
            .naive_utc()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Session lifetime of {} days overflows the session expiry",
                    self.ttl.num_days()
                ))
            })?;

        let session = SessionRepository::new(self.db)
            .create(&token, user_id, expires_at)
            .await?;

        Ok(session)
    }

    /// Validates a session token.
    ///
    /// Expired sessions are deleted when encountered, as are sessions whose user no longer
    /// exists.
    ///
    /// # Returns
    /// - `Ok(Some((session, user)))` - Session is valid
    /// - `Ok(None)` - Token is unknown, expired, or orphaned
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn validate_session(
        &self,
        token: &str,
    ) -> Result<Option<(SessionModel, UserModel)>, Error> {
        let session_repo = SessionRepository::new(self.db);

        let Some((session, maybe_user)) = session_repo.get_with_user(token).await? else {
            return Ok(None);
        };

        let Some(user) = maybe_user else {
            session_repo.delete(&session.id).await?;

            tracing::debug!(
                user_id = session.user_id,
                "Deleted session whose user was not found in database"
            );

            return Ok(None);
        };

        if session.expires_at <= Utc::now().naive_utc() {
            session_repo.delete(&session.id).await?;

            tracing::debug!(user_id = user.id, "Deleted expired session");

            return Ok(None);
        }

        Ok(Some((session, user)))
    }

    /// Invalidates a session, returning whether it existed.
    pub async fn invalidate_session(&self, token: &str) -> Result<bool, Error> {
        let result = SessionRepository::new(self.db).delete(token).await?;

        Ok(result.rows_affected > 0)
    }

    /// Invalidates every session of a user, returning how many were removed.
    pub async fn invalidate_user_sessions(&self, user_id: i32) -> Result<u64, Error> {
        let result = SessionRepository::new(self.db)
            .delete_by_user_id(user_id)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets the unexpired sessions of a user, newest first.
    pub async fn get_active_sessions(&self, user_id: i32) -> Result<Vec<SessionModel>, Error> {
        let sessions = SessionRepository::new(self.db)
            .get_active_by_user_id(user_id, Utc::now().naive_utc())
            .await?;

        Ok(sessions)
    }
}
