use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::user::UserDto,
    server::{
        data::{
            key::{key_id, KeyRepository},
            user::UserRepository,
        },
        error::Error,
        model::db::UserModel,
        provider::{ProviderIdentity, ProviderProfile},
    },
};

impl From<UserModel> for UserDto {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
        }
    }
}

/// Service for resolving provider identities to users.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the user owning a provider identity, creating one on first login.
    ///
    /// The user is looked up by its key `{provider}:{provider_user_id}`. When absent the user
    /// and key are created in one transaction with attributes copied from the profile. If a
    /// concurrent login creates the same key first, the unique constraint rejects this insert
    /// and the other request's user is returned instead.
    ///
    /// # Returns
    /// - `Ok((UserModel, true))` - User was created by this call
    /// - `Ok((UserModel, false))` - User already existed
    /// - `Err(Error::DbErr)` - Database operation failed
    /// - `Err(Error::InternalError)` - Key exists without its user
    pub async fn get_or_create_user(
        &self,
        provider: &str,
        identity: &ProviderIdentity,
    ) -> Result<(UserModel, bool), Error> {
        let key_id = key_id(provider, &identity.provider_user_id);

        if let Some(user) = self.get_by_key(&key_id).await? {
            return Ok((user, false));
        }

        self.create_with_key(&key_id, &identity.profile).await
    }

    /// Creates the user and its key in one transaction.
    ///
    /// A unique violation on the key means a concurrent login created it first; the
    /// transaction is rolled back and that login's user is read back instead.
    async fn create_with_key(
        &self,
        key_id: &str,
        profile: &ProviderProfile,
    ) -> Result<(UserModel, bool), Error> {
        let txn = self.db.begin().await?;

        let created = async {
            let user = UserRepository::new(&txn).create(profile).await?;
            KeyRepository::new(&txn).create(key_id, user.id).await?;

            Ok::<_, DbErr>(user)
        }
        .await;

        match created {
            Ok(user) => {
                txn.commit().await?;

                Ok((user, true))
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback().await?;

                tracing::debug!(
                    key_id = %key_id,
                    "Key created by a concurrent login, reading it back"
                );

                let user = self.get_by_key(key_id).await?.ok_or_else(|| {
                    Error::InternalError(format!(
                        "Key {} violated its unique constraint but could not be found",
                        key_id
                    ))
                })?;

                Ok((user, false))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_by_key(&self, key_id: &str) -> Result<Option<UserModel>, Error> {
        match KeyRepository::new(self.db).get_by_id(key_id).await? {
            None => Ok(None),
            Some((_, Some(user))) => Ok(Some(user)),
            // Only possible if the foreign key from key to user is not enforced
            Some((key, None)) => Err(Error::InternalError(format!(
                "Failed to find user ID {} for key {}",
                key.user_id, key.id
            ))),
        }
    }
}
