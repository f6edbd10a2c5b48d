use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketDepartment::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketDepartment::Id))
                    .col(string(TicketDepartment::Name))
                    .col(text(TicketDepartment::Description))
                    .col(boolean(TicketDepartment::IsHidden).default(false))
                    .col(boolean(TicketDepartment::IsDisabled).default(false))
                    .col(timestamp(TicketDepartment::CreatedAt))
                    .col(timestamp(TicketDepartment::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketDepartment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketDepartment {
    Table,
    Id,
    Name,
    Description,
    IsHidden,
    IsDisabled,
    CreatedAt,
    UpdatedAt,
}
