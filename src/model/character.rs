//! Character domain models.
//!
//! Characters are minted when an application is accepted; the portal never
//! creates one directly from user input.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: i32,
    pub user_id: i32,
    pub faction_id: i32,
    pub name: String,
    pub subrace: String,
    pub class: String,
    pub backstory: String,
    pub description: String,
    pub starting_power: serde_json::Value,
    pub is_permad: bool,
    pub created_at: DateTime<Utc>,
}

impl Character {
    pub fn from_entity(entity: entity::character::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            faction_id: entity.faction_id,
            name: entity.name,
            subrace: entity.subrace,
            class: entity.class,
            backstory: entity.backstory,
            description: entity.description,
            starting_power: entity.starting_power,
            is_permad: entity.is_permad,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> CharacterDto {
        CharacterDto {
            id: self.id,
            faction_id: self.faction_id,
            name: self.name,
            subrace: self.subrace,
            class: self.class,
            backstory: self.backstory,
            description: self.description,
            is_permad: self.is_permad,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDto {
    pub id: i32,
    pub faction_id: i32,
    pub name: String,
    pub subrace: String,
    pub class: String,
    pub backstory: String,
    pub description: String,
    pub is_permad: bool,
    pub created_at: DateTime<Utc>,
}

/// Parameters for minting a character from an accepted application.
#[derive(Debug, Clone)]
pub struct CreateCharacterParam {
    pub user_id: i32,
    pub faction_id: i32,
    pub name: String,
    pub subrace: String,
    pub class: String,
    pub backstory: String,
    pub description: String,
    pub starting_power: serde_json::Value,
}
