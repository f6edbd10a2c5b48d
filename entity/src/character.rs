//! Accepted characters minted from whitelist applications.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub faction_id: i32,
    pub name: String,
    pub subrace: String,
    pub class: String,
    #[sea_orm(column_type = "Text")]
    pub backstory: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub starting_power: Json,
    /// Permadeath flag. A permad character no longer counts as live for
    /// whitelist gating.
    pub is_permad: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::faction::Entity",
        from = "Column::FactionId",
        to = "super::faction::Column::Id"
    )]
    Faction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::faction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
