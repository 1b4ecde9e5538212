use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::{
    constant::TEST_GITHUB_ACCESS_TOKEN,
    fixtures::github::{factory, GitHubFixtures},
};

impl<'a> GitHubFixtures<'a> {
    /// Create a `POST /login/oauth/access_token` endpoint issuing an access token.
    pub fn create_token_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/login/oauth/access_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(factory::github_token().to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a `POST /login/oauth/access_token` endpoint rejecting the code.
    pub fn create_token_error_endpoint(&mut self, error: &str, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/login/oauth/access_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(factory::github_token_error(error).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a `GET /user` endpoint returning the profile to the mock access token.
    pub fn create_user_endpoint(&mut self, user: Value, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("GET", "/user")
            .match_header(
                "authorization",
                Matcher::Exact(format!("Bearer {}", TEST_GITHUB_ACCESS_TOKEN)),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user.to_string())
            .expect(expected_requests)
            .create()
    }
}
