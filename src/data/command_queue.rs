//! Command queue data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Queued console command awaiting a user's next join.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedCommand {
    pub id: i32,
    pub user_id: i32,
    pub command: String,
}

impl QueuedCommand {
    fn from_entity(entity: entity::command_queue::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            command: entity.command,
        }
    }
}

pub struct CommandQueueRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandQueueRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i32, command: &str) -> Result<QueuedCommand, DbErr> {
        let entity = entity::command_queue::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            command: ActiveValue::Set(command.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(QueuedCommand::from_entity(entity))
    }

    /// Pending commands for a user, oldest first so they run in queue order.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<QueuedCommand>, DbErr> {
        let entities = entity::prelude::CommandQueue::find()
            .filter(entity::command_queue::Column::UserId.eq(user_id))
            .order_by_asc(entity::command_queue::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(QueuedCommand::from_entity).collect())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::CommandQueue::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
