use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::RedisStore;

use crate::server::{
    config::Config,
    error::Error,
    provider::{
        discord::{DiscordConfig, DiscordProvider},
        github::{GitHubConfig, GitHubProvider},
        ProviderRegistry,
    },
    pubsub::{connect_publisher, pubsub_config, AuthEventPublisher},
};

/// Build the registry of supported OAuth providers
///
/// GitHub is always registered and is the primary provider; Discord only when configured.
pub fn build_providers(config: &Config) -> Result<ProviderRegistry, Error> {
    let github = GitHubProvider::new(GitHubConfig::new(
        &config.github_client_id,
        &config.github_client_secret,
        &config.github_callback_url,
    ))?;

    let mut providers = ProviderRegistry::new().with_provider(Arc::new(github));

    match &config.discord {
        Some(discord) => {
            let discord = DiscordProvider::new(DiscordConfig::new(
                &discord.client_id,
                &discord.client_secret,
                &discord.callback_url,
            ))?;

            providers = providers.with_provider(Arc::new(discord));
        }
        None => tracing::info!("DISCORD_CLIENT_ID is not set, Discord login is disabled"),
    }

    Ok(providers)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis and configure the browser-session store
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<tower_sessions_redis_store::fred::prelude::Pool>>, Error>
{
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};
    use tower_sessions_redis_store::fred::prelude::*;

    let config = Config::from_url(&config.valkey_url)?;
    let policy = ReconnectPolicy::new_exponential(0, 100, 30_000, 2);
    let pool = Pool::new(config, None, None, Some(policy), 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Secure cookies outside of debug builds
    let secure_cookies = !cfg!(debug_assertions);

    // Only holds the CSRF state of a pending login
    let session = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::hours(1)));

    Ok(session)
}

/// Connect to the pub/sub server, if one is configured
pub async fn connect_to_pubsub(config: &Config) -> Result<Option<AuthEventPublisher>, Error> {
    let Some(url) = &config.pubsub_url else {
        tracing::info!("PUBSUB_URL is not set, auth events will not be published");

        return Ok(None);
    };

    let redis_config = pubsub_config(url, config.pubsub_api_key.as_deref())?;
    let publisher = connect_publisher(redis_config).await?;

    Ok(Some(publisher))
}
