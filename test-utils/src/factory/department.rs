//! Ticket department factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct DepartmentFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    is_hidden: bool,
    is_disabled: bool,
}

impl<'a> DepartmentFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Department {}", next_id()),
            is_hidden: false,
            is_disabled: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.is_hidden = hidden;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    pub async fn build(self) -> Result<entity::ticket_department::Model, DbErr> {
        let now = Utc::now();
        entity::ticket_department::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set("A test department".to_string()),
            is_hidden: ActiveValue::Set(self.is_hidden),
            is_disabled: ActiveValue::Set(self.is_disabled),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a visible, enabled department.
pub async fn create_department(
    db: &DatabaseConnection,
) -> Result<entity::ticket_department::Model, DbErr> {
    DepartmentFactory::new(db).build().await
}
