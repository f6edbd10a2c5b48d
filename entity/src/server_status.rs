//! Raw server status snapshots posted by the status poller.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "server_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Poller payload, keyed by server UUID.
    pub status: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
