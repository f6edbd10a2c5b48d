use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MinecraftAuthentication::Table)
                    .if_not_exists()
                    .col(pk_auto(MinecraftAuthentication::Id))
                    .col(string(MinecraftAuthentication::AuthCode))
                    .col(string(MinecraftAuthentication::Uuid))
                    .col(string(MinecraftAuthentication::Username))
                    .col(boolean(MinecraftAuthentication::IsUsed).default(false))
                    .col(timestamp(MinecraftAuthentication::CreatedAt))
                    .col(timestamp(MinecraftAuthentication::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_minecraft_authentication_auth_code")
                    .table(MinecraftAuthentication::Table)
                    .col(MinecraftAuthentication::AuthCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(MinecraftAuthentication::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum MinecraftAuthentication {
    Table,
    Id,
    AuthCode,
    Uuid,
    Username,
    IsUsed,
    CreatedAt,
    UpdatedAt,
}
