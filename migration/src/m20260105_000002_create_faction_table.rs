use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Faction::Table)
                    .if_not_exists()
                    .col(pk_auto(Faction::Id))
                    .col(string(Faction::Name))
                    .col(timestamp(Faction::CreatedAt))
                    .col(timestamp(Faction::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Faction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Faction {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}
