use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::server::{provider::ProviderRegistry, pubsub::AuthEventPublisher};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub providers: ProviderRegistry,
    /// `None` when no pub/sub server is configured
    pub pubsub: Option<AuthEventPublisher>,
    /// Lifetime of newly created login sessions
    pub session_ttl: Duration,
}
