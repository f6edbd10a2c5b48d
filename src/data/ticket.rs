//! Ticket data repository.
//!
//! Handles ticket rows and their status transitions. Replies live in
//! [`crate::data::ticket_reply`].

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::model::ticket::{CreateTicketParam, Ticket, TicketStatus};

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new open ticket.
    ///
    /// The first message is stored separately as a reply row by the service
    /// layer; this only creates the ticket itself.
    pub async fn create(&self, param: &CreateTicketParam) -> Result<Ticket, DbErr> {
        let now = Utc::now();
        let entity = entity::ticket::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            owner_id: ActiveValue::Set(param.owner_id),
            department_id: ActiveValue::Set(param.department_id),
            subject: ActiveValue::Set(param.subject.clone()),
            status: ActiveValue::Set(TicketStatus::Open),
            last_replied_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Ticket::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, DbErr> {
        let entity = entity::prelude::Ticket::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Ticket::from_entity))
    }

    /// Gets a user's tickets, most recently updated first.
    pub async fn get_for_owner(&self, owner_id: i32) -> Result<Vec<Ticket>, DbErr> {
        let entities = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::ticket::Column::UpdatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Ticket::from_entity).collect())
    }

    /// Tickets needing staff attention: everything not closed and not
    /// already answered, stalest first.
    pub async fn get_active(&self) -> Result<Vec<Ticket>, DbErr> {
        let entities = entity::prelude::Ticket::find()
            .filter(
                Condition::all()
                    .add(entity::ticket::Column::Status.ne(TicketStatus::Closed))
                    .add(entity::ticket::Column::Status.ne(TicketStatus::Answered)),
            )
            .order_by_asc(entity::ticket::Column::UpdatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Ticket::from_entity).collect())
    }

    /// Tickets in a specific state, stalest first.
    pub async fn get_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>, DbErr> {
        let entities = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::Status.eq(status))
            .order_by_asc(entity::ticket::Column::UpdatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Ticket::from_entity).collect())
    }

    pub async fn set_status(&self, id: Uuid, status: TicketStatus) -> Result<Ticket, DbErr> {
        let entity = self.require(id).await?;

        let mut active: entity::ticket::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Ticket::from_entity(active.update(self.db).await?))
    }

    /// Applies a reply's side effects on the ticket row: new status and a
    /// fresh `last_replied_at`.
    pub async fn record_reply(&self, id: Uuid, status: TicketStatus) -> Result<Ticket, DbErr> {
        let now = Utc::now();
        let entity = self.require(id).await?;

        let mut active: entity::ticket::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status);
        active.last_replied_at = ActiveValue::Set(now);
        active.updated_at = ActiveValue::Set(now);

        Ok(Ticket::from_entity(active.update(self.db).await?))
    }

    pub async fn set_department(&self, id: Uuid, department_id: i32) -> Result<Ticket, DbErr> {
        let entity = self.require(id).await?;

        let mut active: entity::ticket::ActiveModel = entity.into();
        active.department_id = ActiveValue::Set(department_id);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Ticket::from_entity(active.update(self.db).await?))
    }

    async fn require(&self, id: Uuid) -> Result<entity::ticket::Model, DbErr> {
        entity::prelude::Ticket::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Ticket with id {} not found",
                id
            )))
    }
}
