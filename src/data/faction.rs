//! Faction data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

use crate::model::faction::Faction;

pub struct FactionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FactionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str) -> Result<Faction, DbErr> {
        let now = Utc::now();
        let entity = entity::faction::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Faction::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Faction>, DbErr> {
        let entity = entity::prelude::Faction::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Faction::from_entity))
    }

    pub async fn get_all(&self) -> Result<Vec<Faction>, DbErr> {
        let entities = entity::prelude::Faction::find()
            .order_by_asc(entity::faction::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Faction::from_entity).collect())
    }
}
