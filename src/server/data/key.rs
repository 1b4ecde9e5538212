use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait};

use crate::server::model::db::{KeyModel, UserModel};

/// Builds the key ID anchoring a user to a provider identity.
pub fn key_id(provider: &str, provider_user_id: &str) -> String {
    format!("{}:{}", provider, provider_user_id)
}

pub struct KeyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> KeyRepository<'a, C> {
    /// Creates a new instance of [`KeyRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an OAuth key for a user; OAuth keys never carry a password
    ///
    /// Fails with a unique constraint violation if the key already exists.
    pub async fn create(&self, key_id: &str, user_id: i32) -> Result<KeyModel, DbErr> {
        let key = entity::auth_key::ActiveModel {
            id: ActiveValue::Set(key_id.to_string()),
            user_id: ActiveValue::Set(user_id),
            hashed_password: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        key.insert(self.db).await
    }

    /// Gets a key along with the user it belongs to
    pub async fn get_by_id(
        &self,
        key_id: &str,
    ) -> Result<Option<(KeyModel, Option<UserModel>)>, DbErr> {
        entity::prelude::AuthKey::find_by_id(key_id.to_string())
            .find_also_related(entity::auth_user::Entity)
            .one(self.db)
            .await
    }
}
