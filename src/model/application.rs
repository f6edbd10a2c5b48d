//! Whitelist application domain models and parameters.
//!
//! The application lifecycle is pending → accepted | rejected. Acceptance
//! whitelists the user and mints a character; rejection records a reason.
//! Resubmission is limited by a pending-application check and a cooldown
//! window measured from the latest application's update time.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub use entity::application::ApplicationStatus;

/// Days an applicant must wait after their latest application before
/// submitting another one.
pub const APPLICATION_COOLDOWN_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: i32,
    pub user_id: i32,
    pub faction_id: i32,
    pub character_name: String,
    pub character_race: String,
    pub character_class: String,
    pub backstory: String,
    pub description: String,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn from_entity(entity: entity::application::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            faction_id: entity.faction_id,
            character_name: entity.character_name,
            character_race: entity.character_race,
            character_class: entity.character_class,
            backstory: entity.backstory,
            description: entity.description,
            status: entity.status,
            rejection_reason: entity.rejection_reason,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Earliest instant the applicant may submit again after this
    /// application.
    pub fn cooldown_ends_at(&self) -> DateTime<Utc> {
        self.updated_at + Duration::days(APPLICATION_COOLDOWN_DAYS)
    }

    pub fn into_dto(self) -> ApplicationDto {
        let cooldown_ends_at = self.cooldown_ends_at();
        ApplicationDto {
            id: self.id,
            user_id: self.user_id,
            faction_id: self.faction_id,
            character_name: self.character_name,
            character_race: self.character_race,
            character_class: self.character_class,
            backstory: self.backstory,
            description: self.description,
            status: self.status,
            rejection_reason: self.rejection_reason,
            cooldown_ends_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDto {
    pub id: i32,
    pub user_id: i32,
    pub faction_id: i32,
    pub character_name: String,
    pub character_race: String,
    pub character_class: String,
    pub backstory: String,
    pub description: String,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub cooldown_ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for submitting a new application.
#[derive(Debug, Clone)]
pub struct CreateApplicationParam {
    pub user_id: i32,
    pub faction_id: i32,
    pub character_name: String,
    pub character_race: String,
    pub character_class: String,
    pub backstory: String,
    pub description: String,
}

/// Application counts by status for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplicationCounts {
    pub pending: u64,
    pub accepted: u64,
    pub rejected: u64,
}
