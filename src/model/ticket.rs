//! Ticket domain models and parameters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub use entity::ticket::TicketStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: Uuid,
    pub owner_id: i32,
    pub department_id: i32,
    pub subject: String,
    pub status: TicketStatus,
    pub last_replied_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn from_entity(entity: entity::ticket::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            department_id: entity.department_id,
            subject: entity.subject,
            status: entity.status,
            last_replied_at: entity.last_replied_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// First UUID segment, used as the human-facing ticket reference.
    pub fn short_id(&self) -> String {
        self.id
            .to_string()
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub fn into_dto(self, department_name: String) -> TicketDto {
        let short_id = self.short_id();
        TicketDto {
            id: self.id,
            short_id,
            owner_id: self.owner_id,
            department_id: self.department_id,
            department_name,
            subject: self.subject,
            status: self.status,
            last_replied_at: self.last_replied_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDto {
    pub id: Uuid,
    pub short_id: String,
    pub owner_id: i32,
    pub department_id: i32,
    pub department_name: String,
    pub subject: String,
    pub status: TicketStatus,
    pub last_replied_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketReply {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TicketReply {
    pub fn from_entity(entity: entity::ticket_reply::Model) -> Self {
        Self {
            id: entity.id,
            ticket_id: entity.ticket_id,
            user_id: entity.user_id,
            content: entity.content,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self, author_name: String) -> TicketReplyDto {
        TicketReplyDto {
            id: self.id,
            user_id: self.user_id,
            author_name,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketReplyDto {
    pub id: Uuid,
    pub user_id: i32,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Ticket with its full reply thread, for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketThreadDto {
    #[serde(flatten)]
    pub ticket: TicketDto,
    pub replies: Vec<TicketReplyDto>,
}

/// Parameters for opening a new ticket with its first message.
#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub owner_id: i32,
    pub department_id: i32,
    pub subject: String,
    pub message: String,
}

/// Parameters for appending a reply to a ticket.
#[derive(Debug, Clone)]
pub struct CreateReplyParam {
    pub ticket_id: Uuid,
    pub user_id: i32,
    pub content: String,
}
