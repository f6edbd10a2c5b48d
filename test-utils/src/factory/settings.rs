//! Settings row factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct SettingsFactory<'a> {
    db: &'a DatabaseConnection,
    applications_open: bool,
    can_register: bool,
    min_application_length: i32,
    max_application_length: i32,
}

impl<'a> SettingsFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            applications_open: true,
            can_register: true,
            min_application_length: 10,
            max_application_length: 5000,
        }
    }

    pub fn applications_open(mut self, open: bool) -> Self {
        self.applications_open = open;
        self
    }

    pub fn can_register(mut self, can_register: bool) -> Self {
        self.can_register = can_register;
        self
    }

    pub fn application_lengths(mut self, min: i32, max: i32) -> Self {
        self.min_application_length = min;
        self.max_application_length = max;
        self
    }

    pub async fn build(self) -> Result<entity::system_setting::Model, DbErr> {
        let now = Utc::now();
        entity::system_setting::ActiveModel {
            applications_open: ActiveValue::Set(self.applications_open),
            can_register: ActiveValue::Set(self.can_register),
            join_discord_on_register: ActiveValue::Set(false),
            maintenance_mode: ActiveValue::Set(false),
            site_theme: ActiveValue::Set("dark".to_string()),
            min_application_length: ActiveValue::Set(self.min_application_length),
            max_application_length: ActiveValue::Set(self.max_application_length),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a permissive settings row (registration and applications open,
/// relaxed length bounds).
pub async fn create_settings(
    db: &DatabaseConnection,
) -> Result<entity::system_setting::Model, DbErr> {
    SettingsFactory::new(db).build().await
}
