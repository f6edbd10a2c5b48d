//! Faction domain models.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Faction {
    pub id: i32,
    pub name: String,
}

impl Faction {
    pub fn from_entity(entity: entity::faction::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }

    pub fn into_dto(self, character_count: u64) -> FactionDto {
        FactionDto {
            id: self.id,
            name: self.name,
            character_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionDto {
    pub id: i32,
    pub name: String,
    /// Number of live characters in the faction.
    pub character_count: u64,
}
