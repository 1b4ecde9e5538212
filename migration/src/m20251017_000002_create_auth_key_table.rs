use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_create_auth_user_table::AuthUser;

static IDX_AUTH_KEY_USER_ID: &str = "idx_auth_key_user_id";
static FK_AUTH_KEY_USER_ID: &str = "fk_auth_key_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthKey::Table)
                    .if_not_exists()
                    .col(string(AuthKey::Id).primary_key())
                    .col(integer(AuthKey::UserId))
                    .col(string_null(AuthKey::HashedPassword))
                    .col(timestamp(AuthKey::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUTH_KEY_USER_ID)
                    .table(AuthKey::Table)
                    .col(AuthKey::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_AUTH_KEY_USER_ID)
                    .from_tbl(AuthKey::Table)
                    .from_col(AuthKey::UserId)
                    .to_tbl(AuthUser::Table)
                    .to_col(AuthUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_AUTH_KEY_USER_ID)
                    .table(AuthKey::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AUTH_KEY_USER_ID)
                    .table(AuthKey::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuthKey::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AuthKey {
    Table,
    Id,
    UserId,
    HashedPassword,
    CreatedAt,
}
