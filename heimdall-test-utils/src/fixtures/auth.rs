use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::SessionModel, TestContext};

impl TestContext {
    pub fn auth<'a>(&'a mut self) -> AuthFixtures<'a> {
        AuthFixtures { setup: self }
    }
}

pub struct AuthFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> AuthFixtures<'a> {
    /// Insert a login session with the given token and expiry.
    pub async fn insert_session(
        &self,
        user_id: i32,
        token: &str,
        expires_at: NaiveDateTime,
    ) -> Result<SessionModel, TestError> {
        Ok(
            entity::prelude::AuthSession::insert(entity::auth_session::ActiveModel {
                id: ActiveValue::Set(token.to_string()),
                user_id: ActiveValue::Set(user_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                expires_at: ActiveValue::Set(expires_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
