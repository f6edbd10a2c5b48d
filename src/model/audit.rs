//! Audit log domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Action tags recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditAction {
    /// Successful portal login.
    Login,
    /// Game-server connection allowed through the whitelist gate.
    Connect,
    /// Staff flag change on a target user.
    StaffStatus(bool),
    /// Admin flag change on a target user.
    AdminStatus(bool),
}

impl AuditAction {
    /// Stored string form, e.g. `STAFF_STATUS true`.
    pub fn as_tag(&self) -> String {
        match self {
            Self::Login => "LOGIN".to_string(),
            Self::Connect => "CONNECT".to_string(),
            Self::StaffStatus(status) => format!("STAFF_STATUS {}", status),
            Self::AdminStatus(status) => format!("ADMIN_STATUS {}", status),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: i32,
    pub user_id: i32,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn from_entity(entity: entity::audit_log::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            action: entity.action,
            target_type: entity.target_type,
            target_id: entity.target_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self, username: String) -> AuditLogEntryDto {
        AuditLogEntryDto {
            id: self.id,
            user_id: self.user_id,
            username,
            action: self.action,
            target_type: self.target_type,
            target_id: self.target_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogEntryDto {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Parameters for appending an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLogParam {
    pub user_id: i32,
    pub action: AuditAction,
    pub target_type: Option<String>,
    pub target_id: Option<i32>,
}
