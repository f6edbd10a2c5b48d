//! Support ticket workflow.
//!
//! Owns the role-based transition rules: who may view, reply, close, and
//! reopen a ticket, and how a reply moves the status. A staff member
//! replying to someone else's ticket marks it `answered`; the owner
//! replying marks it `replied` (back in staff's court).

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::{
        department::DepartmentRepository, ticket::TicketRepository,
        ticket_reply::TicketReplyRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        department::TicketDepartment,
        ticket::{
            CreateReplyParam, CreateTicketParam, Ticket, TicketReply, TicketStatus,
            TicketThreadDto,
        },
        user::User,
    },
};

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a ticket with its first message.
    ///
    /// The department must exist and be accepting tickets (neither hidden
    /// nor disabled).
    pub async fn create(
        &self,
        param: CreateTicketParam,
    ) -> Result<(Ticket, TicketReply, TicketDepartment), AppError> {
        if param.subject.trim().is_empty() || param.message.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Title and message are required".to_string(),
            ));
        }

        let Some(department) = DepartmentRepository::new(self.db)
            .find_by_id(param.department_id)
            .await?
        else {
            return Err(AppError::BadRequest("Invalid department".to_string()));
        };
        if !department.accepts_tickets() {
            return Err(AppError::BadRequest("Invalid department".to_string()));
        }

        let ticket = TicketRepository::new(self.db).create(&param).await?;
        let reply = TicketReplyRepository::new(self.db)
            .create(&CreateReplyParam {
                ticket_id: ticket.id,
                user_id: param.owner_id,
                content: param.message.clone(),
            })
            .await?;

        Ok((ticket, reply, department))
    }

    /// Appends a reply and applies the status transition.
    ///
    /// # Returns
    /// - `Ok((ticket, reply, staff_reply))` - Updated ticket, the new reply,
    ///   and whether this was staff answering someone else's ticket
    /// - `Err(AppError::AuthErr(AccessDenied))` - Author is neither the owner
    ///   nor elevated
    pub async fn reply(
        &self,
        ticket_id: Uuid,
        author: &User,
        content: &str,
    ) -> Result<(Ticket, TicketReply, bool), AppError> {
        let ticket_repo = TicketRepository::new(self.db);
        let ticket = self.require(ticket_id).await?;
        Self::ensure_participant(author, &ticket)?;

        if content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Reply content is required".to_string(),
            ));
        }

        let reply = TicketReplyRepository::new(self.db)
            .create(&CreateReplyParam {
                ticket_id,
                user_id: author.id,
                content: content.to_string(),
            })
            .await?;

        let staff_reply = author.is_elevated() && ticket.owner_id != author.id;
        let status = if staff_reply {
            TicketStatus::Answered
        } else {
            TicketStatus::Replied
        };
        let ticket = ticket_repo.record_reply(ticket_id, status).await?;

        Ok((ticket, reply, staff_reply))
    }

    /// Closes a ticket. Owners may close their own; staff may close any.
    pub async fn close(&self, ticket_id: Uuid, actor: &User) -> Result<Ticket, AppError> {
        let ticket = self.require(ticket_id).await?;
        Self::ensure_participant(actor, &ticket)?;

        TicketRepository::new(self.db)
            .set_status(ticket_id, TicketStatus::Closed)
            .await
            .map_err(AppError::from)
    }

    /// Reopens a ticket. Same permission rule as closing.
    pub async fn reopen(&self, ticket_id: Uuid, actor: &User) -> Result<Ticket, AppError> {
        let ticket = self.require(ticket_id).await?;
        Self::ensure_participant(actor, &ticket)?;

        TicketRepository::new(self.db)
            .set_status(ticket_id, TicketStatus::Open)
            .await
            .map_err(AppError::from)
    }

    /// Moves a ticket to another department (staff only, enforced by the
    /// route guard).
    pub async fn change_department(
        &self,
        ticket_id: Uuid,
        department_id: i32,
    ) -> Result<Ticket, AppError> {
        self.require(ticket_id).await?;

        if DepartmentRepository::new(self.db)
            .find_by_id(department_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest("Department not found".to_string()));
        }

        TicketRepository::new(self.db)
            .set_department(ticket_id, department_id)
            .await
            .map_err(AppError::from)
    }

    /// Forces a ticket status (staff only, enforced by the route guard).
    pub async fn change_status(
        &self,
        ticket_id: Uuid,
        status: TicketStatus,
    ) -> Result<Ticket, AppError> {
        self.require(ticket_id).await?;

        TicketRepository::new(self.db)
            .set_status(ticket_id, status)
            .await
            .map_err(AppError::from)
    }

    /// Loads a ticket with its reply thread for the detail view.
    ///
    /// Only the owner and elevated users may read a thread.
    pub async fn thread(&self, ticket_id: Uuid, viewer: &User) -> Result<TicketThreadDto, AppError> {
        let ticket = self.require(ticket_id).await?;
        Self::ensure_participant(viewer, &ticket)?;

        let department_name = DepartmentRepository::new(self.db)
            .find_by_id(ticket.department_id)
            .await?
            .map(|d| d.name)
            .unwrap_or_default();

        let replies = TicketReplyRepository::new(self.db)
            .get_thread(ticket_id)
            .await?
            .into_iter()
            .map(|(reply, author)| reply.into_dto(author))
            .collect();

        Ok(TicketThreadDto {
            ticket: ticket.into_dto(department_name),
            replies,
        })
    }

    /// Resolves department names for a list of tickets.
    pub async fn with_department_names(
        &self,
        tickets: Vec<Ticket>,
    ) -> Result<Vec<crate::model::ticket::TicketDto>, AppError> {
        let departments = DepartmentRepository::new(self.db).get_all().await?;

        Ok(tickets
            .into_iter()
            .map(|ticket| {
                let name = departments
                    .iter()
                    .find(|d| d.id == ticket.department_id)
                    .map(|d| d.name.clone())
                    .unwrap_or_default();
                ticket.into_dto(name)
            })
            .collect())
    }

    async fn require(&self, ticket_id: Uuid) -> Result<Ticket, AppError> {
        TicketRepository::new(self.db)
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
    }

    fn ensure_participant(user: &User, ticket: &Ticket) -> Result<(), AppError> {
        if ticket.owner_id == user.id || user.is_elevated() {
            return Ok(());
        }

        Err(AuthError::AccessDenied {
            user_id: user.id,
            reason: format!("not a participant of ticket {}", ticket.id),
        }
        .into())
    }
}
