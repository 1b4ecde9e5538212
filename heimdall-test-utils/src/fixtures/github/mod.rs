//! Mock GitHub endpoints.
//!
//! Paths follow GitHub's layout relative to the mock server URL, matching what a provider
//! configured with the server URL as its base URL requests.

pub mod factory;
pub mod mockito;

use crate::TestContext;

impl TestContext {
    pub fn github<'a>(&'a mut self) -> GitHubFixtures<'a> {
        GitHubFixtures { setup: self }
    }
}

pub struct GitHubFixtures<'a> {
    setup: &'a mut TestContext,
}
