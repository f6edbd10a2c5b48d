//! Character factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;

pub struct CharacterFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    faction_id: i32,
    name: String,
    is_permad: bool,
}

impl<'a> CharacterFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, faction_id: i32) -> Self {
        Self {
            db,
            user_id,
            faction_id,
            name: format!("Character {}", next_id()),
            is_permad: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn permad(mut self, permad: bool) -> Self {
        self.is_permad = permad;
        self
    }

    pub async fn build(self) -> Result<entity::character::Model, DbErr> {
        let now = Utc::now();
        entity::character::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            faction_id: ActiveValue::Set(self.faction_id),
            name: ActiveValue::Set(self.name),
            subrace: ActiveValue::Set("Human".to_string()),
            class: ActiveValue::Set("Warrior".to_string()),
            backstory: ActiveValue::Set("A long backstory.".to_string()),
            description: ActiveValue::Set("A detailed description.".to_string()),
            starting_power: ActiveValue::Set(json!({})),
            is_permad: ActiveValue::Set(self.is_permad),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a live character for the user in the faction.
pub async fn create_character(
    db: &DatabaseConnection,
    user_id: i32,
    faction_id: i32,
) -> Result<entity::character::Model, DbErr> {
    CharacterFactory::new(db, user_id, faction_id).build().await
}
