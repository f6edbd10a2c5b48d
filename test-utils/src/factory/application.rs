//! Application factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::application::ApplicationStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ApplicationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    faction_id: i32,
    status: ApplicationStatus,
    backstory: String,
    description: String,
    updated_at: DateTime<Utc>,
}

impl<'a> ApplicationFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, faction_id: i32) -> Self {
        Self {
            db,
            user_id,
            faction_id,
            status: ApplicationStatus::Pending,
            backstory: "backstory ".repeat(60),
            description: "description ".repeat(50),
            updated_at: Utc::now(),
        }
    }

    pub fn status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Backdates the row, for cooldown tests.
    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub async fn build(self) -> Result<entity::application::Model, DbErr> {
        let id = next_id();
        entity::application::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            faction_id: ActiveValue::Set(self.faction_id),
            character_name: ActiveValue::Set(format!("Character {}", id)),
            character_race: ActiveValue::Set("Human".to_string()),
            character_class: ActiveValue::Set("Warrior".to_string()),
            backstory: ActiveValue::Set(self.backstory),
            description: ActiveValue::Set(self.description),
            status: ActiveValue::Set(self.status),
            rejection_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.updated_at),
            updated_at: ActiveValue::Set(self.updated_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending application for the user in the faction.
pub async fn create_application(
    db: &DatabaseConnection,
    user_id: i32,
    faction_id: i32,
) -> Result<entity::application::Model, DbErr> {
    ApplicationFactory::new(db, user_id, faction_id).build().await
}
