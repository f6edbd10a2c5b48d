//! Character data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::character::{Character, CreateCharacterParam};

pub struct CharacterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CharacterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Mints a character, normally from an accepted application.
    pub async fn create(&self, param: CreateCharacterParam) -> Result<Character, DbErr> {
        let now = Utc::now();
        let entity = entity::character::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            faction_id: ActiveValue::Set(param.faction_id),
            name: ActiveValue::Set(param.name),
            subrace: ActiveValue::Set(param.subrace),
            class: ActiveValue::Set(param.class),
            backstory: ActiveValue::Set(param.backstory),
            description: ActiveValue::Set(param.description),
            starting_power: ActiveValue::Set(param.starting_power),
            is_permad: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Character::from_entity(entity))
    }

    /// The user's most recent live (non-permad) character, if any.
    pub async fn latest_live_for_user(&self, user_id: i32) -> Result<Option<Character>, DbErr> {
        let entity = entity::prelude::Character::find()
            .filter(entity::character::Column::UserId.eq(user_id))
            .filter(entity::character::Column::IsPermad.eq(false))
            .order_by_desc(entity::character::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(Character::from_entity))
    }

    /// Whether the user has at least one live character.
    ///
    /// This is the "has an approved character" half of the whitelist gate.
    pub async fn has_live_character(&self, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Character::find()
            .filter(entity::character::Column::UserId.eq(user_id))
            .filter(entity::character::Column::IsPermad.eq(false))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Count of live characters in a faction.
    pub async fn count_live_in_faction(&self, faction_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Character::find()
            .filter(entity::character::Column::FactionId.eq(faction_id))
            .filter(entity::character::Column::IsPermad.eq(false))
            .count(self.db)
            .await
    }
}
