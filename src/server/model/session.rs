//! Browser-session data for the OAuth login flow.
//!
//! The CSRF state of every authorization URL handed out is kept in the tower-sessions browser
//! session until the provider calls back. It is unrelated to the login session, which lives in
//! the database.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

/// Session key for storing the pending authorizations.
pub const SESSION_AUTH_CSRF_KEY: &str = "heimdall:auth:csrf";

/// Number of authorization URLs kept per browser session, oldest dropped first.
pub const MAX_PENDING_AUTHORIZATIONS: usize = 8;

/// Authorization handed out to this browser and not yet completed.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PendingAuthorization {
    /// ID of the provider the authorization URL points at
    pub provider: String,
    /// CSRF state token embedded in the authorization URL
    pub state: String,
}

impl PendingAuthorization {
    /// Remembers an issued authorization alongside the ones still pending.
    ///
    /// Several logins may be in flight at once, e.g. from different tabs, so issuing a new
    /// URL does not invalidate earlier ones.
    pub async fn insert(session: &Session, provider: &str, state: &str) -> Result<(), Error> {
        let mut pending = Self::list(session).await?;

        pending.push(PendingAuthorization {
            provider: provider.to_string(),
            state: state.to_string(),
        });

        if pending.len() > MAX_PENDING_AUTHORIZATIONS {
            let excess = pending.len() - MAX_PENDING_AUTHORIZATIONS;
            pending.drain(..excess);
        }

        session.insert(SESSION_AUTH_CSRF_KEY, pending).await?;

        Ok(())
    }

    /// Gets the pending authorizations, oldest first.
    pub async fn list(session: &Session) -> Result<Vec<Self>, Error> {
        let pending = session
            .get::<Vec<Self>>(SESSION_AUTH_CSRF_KEY)
            .await?
            .unwrap_or_default();

        Ok(pending)
    }

    /// Removes and returns the authorization issued with `state` so a state can only be used
    /// once.
    ///
    /// # Returns
    /// - `Ok(Some(_))` - The state was issued to this browser session
    /// - `Ok(None)` - No pending authorization carries the state
    /// - `Err(Error::SessionError)` - Session store failure
    pub async fn take(session: &Session, state: &str) -> Result<Option<Self>, Error> {
        let mut pending = Self::list(session).await?;

        let Some(index) = pending.iter().position(|p| p.state == state) else {
            return Ok(None);
        };

        let taken = pending.remove(index);

        if pending.is_empty() {
            session.remove::<Vec<Self>>(SESSION_AUTH_CSRF_KEY).await?;
        } else {
            session.insert(SESSION_AUTH_CSRF_KEY, pending).await?;
        }

        Ok(Some(taken))
    }
}
