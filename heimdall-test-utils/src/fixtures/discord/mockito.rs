use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::{
    constant::TEST_DISCORD_ACCESS_TOKEN,
    fixtures::discord::{factory, DiscordFixtures},
};

impl<'a> DiscordFixtures<'a> {
    /// Create a `POST /api/oauth2/token` endpoint issuing an access token.
    pub fn create_token_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/api/oauth2/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(factory::discord_token().to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a `POST /api/oauth2/token` endpoint rejecting the code with `400 Bad Request`.
    pub fn create_token_error_endpoint(&mut self, error: &str, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/api/oauth2/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(factory::discord_token_error(error).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a `GET /api/users/@me` endpoint returning the profile to the mock access token.
    pub fn create_user_endpoint(&mut self, user: Value, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("GET", "/api/users/@me")
            .match_header(
                "authorization",
                Matcher::Exact(format!("Bearer {}", TEST_DISCORD_ACCESS_TOKEN)),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user.to_string())
            .expect(expected_requests)
            .create()
    }
}
