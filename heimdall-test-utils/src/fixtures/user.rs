use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{KeyModel, UserModel},
    TestContext,
};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert a user along with the key for `{provider}:{provider_user_id}`.
    pub async fn insert_user(
        &self,
        provider: &str,
        provider_user_id: &str,
        username: &str,
    ) -> Result<(UserModel, KeyModel), TestError> {
        let now = Utc::now().naive_utc();

        let user = entity::prelude::AuthUser::insert(entity::auth_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            name: ActiveValue::Set(None),
            email: ActiveValue::Set(None),
            profile_picture: ActiveValue::Set(format!("https://example.com/{}.png", username)),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        let key = entity::prelude::AuthKey::insert(entity::auth_key::ActiveModel {
            id: ActiveValue::Set(format!("{}:{}", provider, provider_user_id)),
            user_id: ActiveValue::Set(user.id),
            hashed_password: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        Ok((user, key))
    }
}
