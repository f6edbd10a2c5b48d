use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_create_user_table::User;
use crate::m20260105_000002_create_faction_table::Faction;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(pk_auto(Application::Id))
                    .col(integer(Application::UserId))
                    .col(integer(Application::FactionId))
                    .col(string(Application::CharacterName))
                    .col(string(Application::CharacterRace))
                    .col(string(Application::CharacterClass))
                    .col(text(Application::Backstory))
                    .col(text(Application::Description))
                    .col(string_len(Application::Status, 16).default("pending"))
                    .col(text_null(Application::RejectionReason))
                    .col(timestamp(Application::CreatedAt))
                    .col(timestamp(Application::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_user")
                            .from(Application::Table, Application::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_faction")
                            .from(Application::Table, Application::FactionId)
                            .to(Faction::Table, Faction::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Application {
    Table,
    Id,
    UserId,
    FactionId,
    CharacterName,
    CharacterRace,
    CharacterClass,
    Backstory,
    Description,
    Status,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
