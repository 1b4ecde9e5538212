//! Mock Discord endpoints.
//!
//! Paths follow Discord's layout relative to the mock server URL: the token endpoint and
//! REST API live under `/api`.

pub mod factory;
pub mod mockito;

use crate::TestContext;

impl TestContext {
    pub fn discord<'a>(&'a mut self) -> DiscordFixtures<'a> {
        DiscordFixtures { setup: self }
    }
}

pub struct DiscordFixtures<'a> {
    setup: &'a mut TestContext,
}
