use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailConfirmation::Table)
                    .if_not_exists()
                    .col(pk_auto(EmailConfirmation::Id))
                    .col(integer(EmailConfirmation::UserId))
                    .col(string(EmailConfirmation::Email))
                    .col(string_uniq(EmailConfirmation::Token))
                    .col(boolean(EmailConfirmation::IsUsed).default(false))
                    .col(timestamp(EmailConfirmation::CreatedAt))
                    .col(timestamp(EmailConfirmation::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_confirmation_user")
                            .from(EmailConfirmation::Table, EmailConfirmation::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailConfirmation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailConfirmation {
    Table,
    Id,
    UserId,
    Email,
    Token,
    IsUsed,
    CreatedAt,
    UpdatedAt,
}
