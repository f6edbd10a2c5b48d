use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(uuid_uniq(User::SessionId))
                    .col(string_uniq(User::Username))
                    .col(string(User::Password))
                    .col(string(User::Email))
                    .col(string_null(User::DiscordId))
                    .col(string_null(User::MinecraftUsername))
                    .col(string_null(User::MinecraftUuid))
                    .col(boolean(User::IsAdmin).default(false))
                    .col(boolean(User::IsStaff).default(false))
                    .col(boolean(User::IsBanned).default(false))
                    .col(boolean(User::IsWhitelisted).default(false))
                    .col(boolean(User::EmailConfirmed).default(false))
                    .col(timestamp(User::CreatedAt))
                    .col(timestamp(User::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_minecraft_uuid")
                    .table(User::Table)
                    .col(User::MinecraftUuid)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    SessionId,
    Username,
    Password,
    Email,
    DiscordId,
    MinecraftUsername,
    MinecraftUuid,
    IsAdmin,
    IsStaff,
    IsBanned,
    IsWhitelisted,
    EmailConfirmed,
    CreatedAt,
    UpdatedAt,
}
