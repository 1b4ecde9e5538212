use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::db::{SessionModel, UserModel};

pub struct SessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    /// Creates a new instance of [`SessionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        session_id: &str,
        user_id: i32,
        expires_at: NaiveDateTime,
    ) -> Result<SessionModel, DbErr> {
        let session = entity::auth_session::ActiveModel {
            id: ActiveValue::Set(session_id.to_string()),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            expires_at: ActiveValue::Set(expires_at),
        };

        session.insert(self.db).await
    }

    /// Gets a session along with the user it belongs to
    ///
    /// The user is `None` only if the row was orphaned outside of the foreign key cascade.
    pub async fn get_with_user(
        &self,
        session_id: &str,
    ) -> Result<Option<(SessionModel, Option<UserModel>)>, DbErr> {
        entity::prelude::AuthSession::find_by_id(session_id.to_string())
            .find_also_related(entity::auth_user::Entity)
            .one(self.db)
            .await
    }

    /// Gets the sessions of a user which have not expired as of `now`, newest first
    pub async fn get_active_by_user_id(
        &self,
        user_id: i32,
        now: NaiveDateTime,
    ) -> Result<Vec<SessionModel>, DbErr> {
        entity::prelude::AuthSession::find()
            .filter(entity::auth_session::Column::UserId.eq(user_id))
            .filter(entity::auth_session::Column::ExpiresAt.gt(now))
            .order_by_desc(entity::auth_session::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn delete(&self, session_id: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::AuthSession::delete_by_id(session_id.to_string())
            .exec(self.db)
            .await
    }

    pub async fn delete_by_user_id(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::AuthSession::delete_many()
            .filter(entity::auth_session::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }

    /// Deletes every session which has expired as of `now`, regardless of user
    pub async fn delete_expired(&self, now: NaiveDateTime) -> Result<DeleteResult, DbErr> {
        entity::prelude::AuthSession::delete_many()
            .filter(entity::auth_session::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await
    }
}
