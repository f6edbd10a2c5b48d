//! Minecraft auth-code data repository.
//!
//! Auth codes are written by the auth gateway through the integration API
//! and consumed once when a user links their Minecraft account on the
//! portal.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

/// Pending or spent auth-code row.
#[derive(Debug, Clone, PartialEq)]
pub struct MinecraftAuthCode {
    pub id: i32,
    pub auth_code: String,
    pub uuid: String,
    pub username: String,
    pub is_used: bool,
}

impl MinecraftAuthCode {
    fn from_entity(entity: entity::minecraft_authentication::Model) -> Self {
        Self {
            id: entity.id,
            auth_code: entity.auth_code,
            uuid: entity.uuid,
            username: entity.username,
            is_used: entity.is_used,
        }
    }
}

pub struct MinecraftAuthRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MinecraftAuthRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        auth_code: &str,
        uuid: &str,
        username: &str,
    ) -> Result<MinecraftAuthCode, DbErr> {
        let now = Utc::now();
        let entity = entity::minecraft_authentication::ActiveModel {
            auth_code: ActiveValue::Set(auth_code.to_string()),
            uuid: ActiveValue::Set(uuid.to_string()),
            username: ActiveValue::Set(username.to_string()),
            is_used: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(MinecraftAuthCode::from_entity(entity))
    }

    /// Finds an unspent code by its value.
    pub async fn find_unused_by_code(
        &self,
        auth_code: &str,
    ) -> Result<Option<MinecraftAuthCode>, DbErr> {
        let entity = entity::prelude::MinecraftAuthentication::find()
            .filter(entity::minecraft_authentication::Column::AuthCode.eq(auth_code))
            .filter(entity::minecraft_authentication::Column::IsUsed.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(MinecraftAuthCode::from_entity))
    }

    /// Finds any row carrying the code, spent or not.
    ///
    /// The gateway uses this to tell "code collision" apart from "player
    /// already has a code waiting".
    pub async fn find_by_code(&self, auth_code: &str) -> Result<Option<MinecraftAuthCode>, DbErr> {
        let entity = entity::prelude::MinecraftAuthentication::find()
            .filter(entity::minecraft_authentication::Column::AuthCode.eq(auth_code))
            .one(self.db)
            .await?;

        Ok(entity.map(MinecraftAuthCode::from_entity))
    }

    /// Finds the unspent code previously issued for a player UUID.
    pub async fn find_unused_by_uuid(
        &self,
        uuid: &str,
    ) -> Result<Option<MinecraftAuthCode>, DbErr> {
        let entity = entity::prelude::MinecraftAuthentication::find()
            .filter(entity::minecraft_authentication::Column::Uuid.eq(uuid))
            .filter(entity::minecraft_authentication::Column::IsUsed.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(MinecraftAuthCode::from_entity))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::MinecraftAuthentication::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
