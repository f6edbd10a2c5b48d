//! Ticket reply data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::model::ticket::{CreateReplyParam, TicketReply};

pub struct TicketReplyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketReplyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: &CreateReplyParam) -> Result<TicketReply, DbErr> {
        let now = Utc::now();
        let entity = entity::ticket_reply::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            ticket_id: ActiveValue::Set(param.ticket_id),
            user_id: ActiveValue::Set(param.user_id),
            content: ActiveValue::Set(param.content.clone()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(TicketReply::from_entity(entity))
    }

    /// Gets a ticket's reply thread in posting order, with each author's
    /// username resolved through the reply→user relation.
    pub async fn get_thread(&self, ticket_id: Uuid) -> Result<Vec<(TicketReply, String)>, DbErr> {
        let rows = entity::prelude::TicketReply::find()
            .filter(entity::ticket_reply::Column::TicketId.eq(ticket_id))
            .order_by_asc(entity::ticket_reply::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(reply, user)| {
                let author = user.map(|u| u.username).unwrap_or_default();
                (TicketReply::from_entity(reply), author)
            })
            .collect())
    }
}
