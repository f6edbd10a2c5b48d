use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_create_user_table::User;
use crate::m20260105_000005_create_ticket_department_table::TicketDepartment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_uuid(Ticket::Id))
                    .col(integer(Ticket::OwnerId))
                    .col(integer(Ticket::DepartmentId))
                    .col(string(Ticket::Subject))
                    .col(string_len(Ticket::Status, 16).default("open"))
                    .col(timestamp(Ticket::LastRepliedAt))
                    .col(timestamp(Ticket::CreatedAt))
                    .col(timestamp(Ticket::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_owner")
                            .from(Ticket::Table, Ticket::OwnerId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_department")
                            .from(Ticket::Table, Ticket::DepartmentId)
                            .to(TicketDepartment::Table, TicketDepartment::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    OwnerId,
    DepartmentId,
    Subject,
    Status,
    LastRepliedAt,
    CreatedAt,
    UpdatedAt,
}
