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
                    .table(Character::Table)
                    .if_not_exists()
                    .col(pk_auto(Character::Id))
                    .col(integer(Character::UserId))
                    .col(integer(Character::FactionId))
                    .col(string(Character::Name))
                    .col(string(Character::Subrace))
                    .col(string(Character::Class))
                    .col(text(Character::Backstory))
                    .col(text(Character::Description))
                    .col(json(Character::StartingPower))
                    .col(boolean(Character::IsPermad).default(false))
                    .col(timestamp(Character::CreatedAt))
                    .col(timestamp(Character::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_character_user")
                            .from(Character::Table, Character::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_character_faction")
                            .from(Character::Table, Character::FactionId)
                            .to(Faction::Table, Faction::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Character::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Character {
    Table,
    Id,
    UserId,
    FactionId,
    Name,
    Subrace,
    Class,
    Backstory,
    Description,
    StartingPower,
    IsPermad,
    CreatedAt,
    UpdatedAt,
}
