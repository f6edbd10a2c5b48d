//! Server status snapshot models.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One status snapshot as posted by the status poller: raw JSON keyed by
/// server UUID.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStatusSnapshot {
    pub id: i32,
    pub status: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ServerStatusSnapshot {
    pub fn from_entity(entity: entity::server_status::Model) -> Self {
        Self {
            id: entity.id,
            status: entity.status,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ServerStatusDto {
        ServerStatusDto {
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerStatusDto {
    pub status: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
