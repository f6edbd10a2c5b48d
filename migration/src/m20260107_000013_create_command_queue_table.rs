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
                    .table(CommandQueue::Table)
                    .if_not_exists()
                    .col(pk_auto(CommandQueue::Id))
                    .col(integer(CommandQueue::UserId))
                    .col(string(CommandQueue::Command))
                    .col(timestamp(CommandQueue::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_command_queue_user")
                            .from(CommandQueue::Table, CommandQueue::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommandQueue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CommandQueue {
    Table,
    Id,
    UserId,
    Command,
    CreatedAt,
}
