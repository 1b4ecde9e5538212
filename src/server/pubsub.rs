//! Authentication event publishing.
//!
//! Login activity is announced on a Redis-protocol pub/sub channel so other services can react
//! to new users and sessions. Publishing is best effort: request handlers log a failed publish
//! and carry on.

use std::{future::Future, time::Duration};

use fred::prelude::{ClientLike, Config as RedisConfig, Pool, PubsubInterface, ReconnectPolicy};
use serde::{Deserialize, Serialize};

use crate::server::error::Error;

/// Channel all authentication events are published on.
pub const AUTH_EVENTS_CHANNEL: &str = "heimdall:auth:events";

/// Number of connections kept by the publisher pool.
const PUBSUB_POOL_SIZE: usize = 2;

/// Upper bound for publishing a single event.
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(2);

/// Reconnect delays in milliseconds, doubling from the minimum up to the maximum.
const RECONNECT_MIN_DELAY_MS: u32 = 100;
const RECONNECT_MAX_DELAY_MS: u32 = 30_000;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthEvent {
    /// A provider identity logged in for the first time and a user was created for it
    UserCreated { user_id: i32, provider: String },
    LoggedIn { user_id: i32, provider: String },
    LoggedOut { user_id: i32 },
}

/// Publishes [`AuthEvent`]s to [`AUTH_EVENTS_CHANNEL`].
#[derive(Clone)]
pub struct AuthEventPublisher {
    pool: Pool,
}

impl AuthEventPublisher {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Publishes an event, returning the number of subscribers that received it.
    ///
    /// # Returns
    /// - `Ok(i64)` - Number of subscribers the event was delivered to
    /// - `Err(Error::RedisError)` - The server rejected the command or the connection is down
    /// - `Err(Error::PublishTimeout)` - No reply within [`PUBLISH_TIMEOUT`]
    pub async fn publish(&self, event: &AuthEvent) -> Result<i64, Error> {
        let payload = serde_json::to_string(event)?;

        with_timeout(PUBLISH_TIMEOUT, async {
            let receivers: i64 = self
                .pool
                .next()
                .publish(AUTH_EVENTS_CHANNEL, payload)
                .await?;

            Ok(receivers)
        })
        .await
    }

    /// Publishes an event, logging instead of returning a failure.
    pub async fn publish_best_effort(&self, event: AuthEvent) {
        if let Err(e) = self.publish(&event).await {
            tracing::warn!(?event, "Failed to publish auth event: {}", e);
        }
    }
}

/// Publishes an event if a publisher is configured.
pub async fn publish_event(publisher: Option<&AuthEventPublisher>, event: AuthEvent) {
    if let Some(publisher) = publisher {
        publisher.publish_best_effort(event).await;
    }
}

/// Fails with [`Error::PublishTimeout`] when `future` does not complete within `timeout`.
async fn with_timeout<T>(
    timeout: Duration,
    future: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| Error::PublishTimeout(timeout))?
}

/// Builds the pub/sub connection config from its URL and optional API key.
///
/// The API key is used as the connection password and replaces any password in the URL.
pub fn pubsub_config(url: &str, api_key: Option<&str>) -> Result<RedisConfig, Error> {
    let mut config = RedisConfig::from_url(url)?;

    if let Some(api_key) = api_key {
        config.password = Some(api_key.to_string());
    }

    Ok(config)
}

/// Connects the publisher pool.
///
/// Dropped connections are re-established with exponential backoff for the lifetime of the
/// process.
pub async fn connect_publisher(config: RedisConfig) -> Result<AuthEventPublisher, Error> {
    // Zero attempts retries forever
    let policy =
        ReconnectPolicy::new_exponential(0, RECONNECT_MIN_DELAY_MS, RECONNECT_MAX_DELAY_MS, 2);
    let pool = Pool::new(config, None, None, Some(policy), PUBSUB_POOL_SIZE)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(AuthEventPublisher::new(pool))
}
