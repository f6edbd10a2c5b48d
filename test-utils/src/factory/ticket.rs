//! Ticket and ticket reply factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::ticket::TicketStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    department_id: i32,
    subject: String,
    status: TicketStatus,
}

impl<'a> TicketFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, owner_id: i32, department_id: i32) -> Self {
        Self {
            db,
            owner_id,
            department_id,
            subject: format!("Ticket {}", next_id()),
            status: TicketStatus::Open,
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        let now = Utc::now();
        entity::ticket::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            owner_id: ActiveValue::Set(self.owner_id),
            department_id: ActiveValue::Set(self.department_id),
            subject: ActiveValue::Set(self.subject),
            status: ActiveValue::Set(self.status),
            last_replied_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket owned by the user.
pub async fn create_ticket(
    db: &DatabaseConnection,
    owner_id: i32,
    department_id: i32,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, owner_id, department_id).build().await
}

/// Appends a reply to a ticket.
pub async fn create_reply(
    db: &DatabaseConnection,
    ticket_id: Uuid,
    user_id: i32,
    content: &str,
) -> Result<entity::ticket_reply::Model, DbErr> {
    let now = Utc::now();
    entity::ticket_reply::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        ticket_id: ActiveValue::Set(ticket_id),
        user_id: ActiveValue::Set(user_id),
        content: ActiveValue::Set(content.to_string()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
