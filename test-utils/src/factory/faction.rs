//! Faction factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a faction with a unique name.
pub async fn create_faction(db: &DatabaseConnection) -> Result<entity::faction::Model, DbErr> {
    create_faction_named(db, format!("Faction {}", next_id())).await
}

/// Creates a faction with a specific name.
pub async fn create_faction_named(
    db: &DatabaseConnection,
    name: impl Into<String>,
) -> Result<entity::faction::Model, DbErr> {
    let now = Utc::now();
    entity::faction::ActiveModel {
        name: ActiveValue::Set(name.into()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
