//! One-time Minecraft auth codes.
//!
//! The auth gateway registers a row when a player joins the code server; the
//! player then enters the code on the portal to link the account, which
//! consumes the row.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "minecraft_authentication")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Zero-padded six digit code, stored as text to keep leading zeros.
    pub auth_code: String,
    pub uuid: String,
    pub username: String,
    pub is_used: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
