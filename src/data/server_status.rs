//! Server status snapshot data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

use crate::model::server_status::ServerStatusSnapshot;

pub struct ServerStatusRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerStatusRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        status: serde_json::Value,
    ) -> Result<ServerStatusSnapshot, DbErr> {
        let entity = entity::server_status::ActiveModel {
            status: ActiveValue::Set(status),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ServerStatusSnapshot::from_entity(entity))
    }

    /// The newest snapshot, as shown on the admin dashboard.
    pub async fn latest(&self) -> Result<Option<ServerStatusSnapshot>, DbErr> {
        let entity = entity::prelude::ServerStatus::find()
            .order_by_desc(entity::server_status::Column::CreatedAt)
            .one(self.db)
            .await?;

        Ok(entity.map(ServerStatusSnapshot::from_entity))
    }
}
