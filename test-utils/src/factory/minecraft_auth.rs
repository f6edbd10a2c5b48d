//! Minecraft auth-code factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an auth-code row.
pub async fn create_auth_code(
    db: &DatabaseConnection,
    auth_code: &str,
    uuid: &str,
    username: &str,
    is_used: bool,
) -> Result<entity::minecraft_authentication::Model, DbErr> {
    let now = Utc::now();
    entity::minecraft_authentication::ActiveModel {
        auth_code: ActiveValue::Set(auth_code.to_string()),
        uuid: ActiveValue::Set(uuid.to_string()),
        username: ActiveValue::Set(username.to_string()),
        is_used: ActiveValue::Set(is_used),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
