use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_create_auth_user_table::AuthUser;

static IDX_AUTH_SESSION_USER_ID: &str = "idx_auth_session_user_id";
static IDX_AUTH_SESSION_EXPIRES_AT: &str = "idx_auth_session_expires_at";
static FK_AUTH_SESSION_USER_ID: &str = "fk_auth_session_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthSession::Table)
                    .if_not_exists()
                    .col(string(AuthSession::Id).primary_key())
                    .col(integer(AuthSession::UserId))
                    .col(timestamp(AuthSession::CreatedAt))
                    .col(timestamp(AuthSession::ExpiresAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUTH_SESSION_USER_ID)
                    .table(AuthSession::Table)
                    .col(AuthSession::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUTH_SESSION_EXPIRES_AT)
                    .table(AuthSession::Table)
                    .col(AuthSession::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_AUTH_SESSION_USER_ID)
                    .from_tbl(AuthSession::Table)
                    .from_col(AuthSession::UserId)
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
                    .name(FK_AUTH_SESSION_USER_ID)
                    .table(AuthSession::Table)
                    .to_owned(),
            )
            .await?;

        for index in [IDX_AUTH_SESSION_EXPIRES_AT, IDX_AUTH_SESSION_USER_ID] {
            manager
                .drop_index(Index::drop().name(index).table(AuthSession::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(AuthSession::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AuthSession {
    Table,
    Id,
    UserId,
    CreatedAt,
    ExpiresAt,
}
