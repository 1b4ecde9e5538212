//! Declarative test builder.
//!
//! Configuration methods queue work which is executed in order by the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_auth_tables()
///     .with_github_token_endpoint(1)
///     .with_github_user_endpoint(factory::github_user(42, "alice", None, None, "http://x/a.png"), 1)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_auth_tables: bool,

    // Database fixtures to insert, (provider, provider_user_id, username)
    users: Vec<(String, String, String)>,

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    token_endpoints: Vec<usize>,
    token_error_endpoints: Vec<(String, usize)>,
    user_endpoints: Vec<(Value, usize)>,
    discord_token_endpoints: Vec<usize>,
    discord_token_error_endpoints: Vec<(String, usize)>,
    discord_user_endpoints: Vec<(Value, usize)>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_auth_tables: false,
            users: Vec::new(),
            mock_builders: Vec::new(),
            token_endpoints: Vec::new(),
            token_error_endpoints: Vec::new(),
            user_endpoints: Vec::new(),
            discord_token_endpoints: Vec::new(),
            discord_token_error_endpoints: Vec::new(),
            discord_user_endpoints: Vec::new(),
        }
    }

    /// Add the user, key, and login session tables to the test database.
    pub fn with_auth_tables(mut self) -> Self {
        self.include_auth_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with the key `{provider}:{provider_user_id}` during `build()`.
    ///
    /// Requires the auth tables.
    pub fn with_user(
        mut self,
        provider: impl Into<String>,
        provider_user_id: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        self.users
            .push((provider.into(), provider_user_id.into(), username.into()));
        self
    }

    /// Add a GitHub token endpoint issuing an access token for any code.
    ///
    /// # Arguments
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_github_token_endpoint(mut self, expected_requests: usize) -> Self {
        self.token_endpoints.push(expected_requests);
        self
    }

    /// Add a GitHub token endpoint rejecting the code with the given OAuth error.
    ///
    /// Like GitHub, the endpoint answers `200 OK` with the error in the body.
    pub fn with_github_token_error_endpoint(
        mut self,
        error: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.token_error_endpoints
            .push((error.into(), expected_requests));
        self
    }

    /// Add a GitHub `GET /user` endpoint returning the given profile.
    ///
    /// Build the profile with [`factory::github_user`](crate::fixtures::github::factory::github_user).
    pub fn with_github_user_endpoint(mut self, user: Value, expected_requests: usize) -> Self {
        self.user_endpoints.push((user, expected_requests));
        self
    }

    /// Add a Discord token endpoint issuing an access token for any code.
    pub fn with_discord_token_endpoint(mut self, expected_requests: usize) -> Self {
        self.discord_token_endpoints.push(expected_requests);
        self
    }

    /// Add a Discord token endpoint rejecting the code with the given OAuth error.
    pub fn with_discord_token_error_endpoint(
        mut self,
        error: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.discord_token_error_endpoints
            .push((error.into(), expected_requests));
        self
    }

    /// Add a Discord `GET /users/@me` endpoint returning the given profile.
    ///
    /// Build the profile with [`discord_user`](crate::fixtures::discord::factory::discord_user).
    pub fn with_discord_user_endpoint(mut self, user: Value, expected_requests: usize) -> Self {
        self.discord_user_endpoints.push((user, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mock server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (auth tables if specified, then custom tables)
    /// 2. Inserts database fixtures
    /// 3. Creates mock HTTP endpoints (custom endpoints first, then GitHub and Discord shortcuts)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_auth_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::AuthUser),
                schema.create_table_from_entity(entity::prelude::AuthKey),
                schema.create_table_from_entity(entity::prelude::AuthSession),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (provider, provider_user_id, username) in self.users {
            setup
                .user()
                .insert_user(&provider, &provider_user_id, &username)
                .await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints are created first so tests can shadow a shortcut for the same path
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for expected in self.token_endpoints {
            mocks.push(setup.github().create_token_endpoint(expected));
        }

        for (error, expected) in self.token_error_endpoints {
            mocks.push(setup.github().create_token_error_endpoint(&error, expected));
        }

        for (user, expected) in self.user_endpoints {
            mocks.push(setup.github().create_user_endpoint(user, expected));
        }

        for expected in self.discord_token_endpoints {
            mocks.push(setup.discord().create_token_endpoint(expected));
        }

        for (error, expected) in self.discord_token_error_endpoints {
            mocks.push(setup.discord().create_token_error_endpoint(&error, expected));
        }

        for (user, expected) in self.discord_user_endpoints {
            mocks.push(setup.discord().create_user_endpoint(user, expected));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
