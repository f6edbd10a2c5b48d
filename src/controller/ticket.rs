//! Support ticket endpoints.
//!
//! Everything here requires a whitelisted account; staff-only transitions
//! additionally require the staff guard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    data::{department::DepartmentRepository, ticket::TicketRepository},
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{
        api::MessageDto,
        settings::WebhookKind,
        ticket::{CreateTicketParam, TicketStatus},
    },
    service::{settings::SettingsService, ticket::TicketService, webhook},
    state::AppState,
};

#[derive(Deserialize)]
pub struct CreateTicketDto {
    pub subject: String,
    pub department_id: i32,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ReplyDto {
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChangeDepartmentDto {
    pub department_id: i32,
}

#[derive(Deserialize)]
pub struct ChangeStatusDto {
    pub status: TicketStatus,
}

/// GET /api/ticket/mine - The caller's tickets, most recently updated first
pub async fn mine(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Whitelisted])
        .await?;

    let tickets = TicketRepository::new(&state.db)
        .get_for_owner(user.id)
        .await?;
    let dtos = TicketService::new(&state.db)
        .with_department_names(tickets)
        .await?;

    Ok((StatusCode::OK, Json(dtos)))
}

/// GET /api/ticket/departments - Departments currently accepting tickets
pub async fn departments(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Whitelisted])
        .await?;

    let departments: Vec<_> = DepartmentRepository::new(&state.db)
        .get_available()
        .await?
        .into_iter()
        .map(|d| d.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(departments)))
}

/// POST /api/ticket - Open a ticket with its first message
///
/// Fires the ticket webhook in the background.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Whitelisted])
        .await?;

    let (ticket, reply, department) = TicketService::new(&state.db)
        .create(CreateTicketParam {
            owner_id: user.id,
            department_id: dto.department_id,
            subject: dto.subject,
            message: dto.message,
        })
        .await?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;
    state.webhooks.dispatch(
        settings.webhook_url(WebhookKind::Ticket).map(String::from),
        webhook::new_ticket(&ticket, &department.name, &user, &reply.content),
    );

    Ok((
        StatusCode::OK,
        Json(ticket.into_dto(department.name.clone())),
    ))
}

/// GET /api/ticket/{id} - Ticket thread for the owner or staff
pub async fn view(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Whitelisted])
        .await?;

    let thread = TicketService::new(&state.db).thread(ticket_id, &user).await?;

    Ok((StatusCode::OK, Json(thread)))
}

/// POST /api/ticket/{id}/reply - Append a reply
///
/// An owner reply flips the ticket to `replied` and fires the ticket
/// webhook; a staff reply flips it to `answered` without webhooking.
pub async fn reply(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
    Json(dto): Json<ReplyDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let ticket_service = TicketService::new(&state.db);
    let (ticket, reply, staff_reply) = ticket_service
        .reply(ticket_id, &user, &dto.content)
        .await?;

    if !staff_reply {
        let settings = SettingsService::new(&state.db, &state.settings_cache)
            .get()
            .await?;
        let department_name = DepartmentRepository::new(&state.db)
            .find_by_id(ticket.department_id)
            .await?
            .map(|d| d.name)
            .unwrap_or_default();
        state.webhooks.dispatch(
            settings.webhook_url(WebhookKind::Ticket).map(String::from),
            webhook::ticket_reply(&ticket, &department_name, &user, &reply.content),
        );
    }

    Ok((StatusCode::OK, Json(MessageDto::new("Reply added"))))
}

/// POST /api/ticket/{id}/close - Close a ticket (owner or staff)
pub async fn close(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TicketService::new(&state.db).close(ticket_id, &user).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Ticket closed"))))
}

/// POST /api/ticket/{id}/open - Reopen a ticket (owner or staff)
pub async fn reopen(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TicketService::new(&state.db)
        .reopen(ticket_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Ticket opened"))))
}

/// POST /api/ticket/{id}/department - Move a ticket (staff)
pub async fn change_department(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
    Json(dto): Json<ChangeDepartmentDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    TicketService::new(&state.db)
        .change_department(ticket_id, dto.department_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Department changed"))))
}

/// POST /api/ticket/{id}/status - Force a ticket status (staff)
pub async fn change_status(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
    Json(dto): Json<ChangeStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    TicketService::new(&state.db)
        .change_status(ticket_id, dto.status)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Status changed"))))
}
