use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_create_user_table::User;
use crate::m20260105_000006_create_ticket_table::Ticket;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketReply::Table)
                    .if_not_exists()
                    .col(pk_uuid(TicketReply::Id))
                    .col(uuid(TicketReply::TicketId))
                    .col(integer(TicketReply::UserId))
                    .col(text(TicketReply::Content))
                    .col(timestamp(TicketReply::CreatedAt))
                    .col(timestamp(TicketReply::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_reply_ticket")
                            .from(TicketReply::Table, TicketReply::TicketId)
                            .to(Ticket::Table, Ticket::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_reply_user")
                            .from(TicketReply::Table, TicketReply::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketReply::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketReply {
    Table,
    Id,
    TicketId,
    UserId,
    Content,
    CreatedAt,
    UpdatedAt,
}
