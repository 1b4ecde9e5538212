use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

use crate::server::{model::db::UserModel, provider::ProviderProfile};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user with attributes copied from the provider profile
    pub async fn create(&self, profile: &ProviderProfile) -> Result<UserModel, DbErr> {
        let user = entity::auth_user::ActiveModel {
            username: ActiveValue::Set(profile.username.clone()),
            name: ActiveValue::Set(profile.name.clone()),
            email: ActiveValue::Set(profile.email.clone()),
            profile_picture: ActiveValue::Set(profile.profile_picture.clone()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }
}
