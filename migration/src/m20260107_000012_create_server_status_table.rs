use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServerStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(ServerStatus::Id))
                    .col(json(ServerStatus::Status))
                    .col(timestamp(ServerStatus::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServerStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServerStatus {
    Table,
    Id,
    Status,
    CreatedAt,
}
