//! Admin back-office endpoints: dashboard, DataTables queries, application
//! review, user moderation, and the settings editor.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    data::{
        application::ApplicationRepository, audit_log::AuditLogRepository,
        character::CharacterRepository, command_queue::CommandQueueRepository,
        faction::FactionRepository, server_status::ServerStatusRepository, ticket::TicketRepository,
        user::UserRepository,
    },
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{
        api::{DataTableQuery, DataTableResponse, MessageDto},
        application::{ApplicationCounts, ApplicationStatus},
        audit::{AuditAction, CreateAuditLogParam},
        faction::FactionDto,
        server_status::ServerStatusDto,
        settings::{ServerRef, UpdateSettingsParam, WebhookKind},
        ticket::TicketStatus,
        user::UserDto,
    },
    service::{
        application::ApplicationService, settings::SettingsService, ticket::TicketService, webhook,
    },
    state::AppState,
};

/// Admin dashboard aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardDto {
    pub applications: ApplicationCounts,
    /// Accounts with neither Minecraft nor Discord linked.
    pub new_users: u64,
    /// Fully linked accounts still waiting on the whitelist.
    pub fully_linked: u64,
    pub whitelisted: u64,
    pub factions: Vec<FactionDto>,
    pub servers: Vec<ServerRef>,
    pub latest_status: Option<ServerStatusDto>,
}

#[derive(Deserialize)]
pub struct ApplicationListQuery {
    #[serde(default = "default_application_status")]
    pub status: ApplicationStatus,
}

fn default_application_status() -> ApplicationStatus {
    ApplicationStatus::Pending
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketListFilter {
    /// Open or replied: waiting on staff.
    Active,
    Answered,
    Closed,
}

#[derive(Deserialize)]
pub struct TicketListQuery {
    pub filter: Option<TicketListFilter>,
}

#[derive(Deserialize)]
pub struct RejectApplicationDto {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct QueueCommandDto {
    pub command: String,
}

#[derive(Deserialize)]
pub struct CreateFactionDto {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ApplicationsToggleDto {
    pub open: bool,
}

#[derive(Deserialize)]
pub struct SetRolesDto {
    pub is_staff: Option<bool>,
    pub is_admin: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateSettingsDto {
    pub applications_open: bool,
    pub can_register: bool,
    pub join_discord_on_register: bool,
    pub maintenance_mode: bool,
    pub site_theme: String,
    pub min_application_length: i32,
    pub max_application_length: i32,
    pub panel_api_key: Option<String>,
    pub panel_api_url: Option<String>,
    pub live_server_uuid: Option<String>,
    pub staging_server_uuid: Option<String>,
    pub fallback_server_uuid: Option<String>,
    pub ticket_webhook: Option<String>,
    pub application_webhook: Option<String>,
    pub general_webhook: Option<String>,
    pub dev_webhook: Option<String>,
}

/// GET /api/admin/dashboard - Counts and status for the landing page
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user_repo = UserRepository::new(&state.db);
    let character_repo = CharacterRepository::new(&state.db);

    let applications = ApplicationRepository::new(&state.db).counts().await?;
    let new_users = user_repo.count_unlinked().await?;
    let fully_linked = user_repo.count_linked_unwhitelisted().await?;
    let whitelisted = user_repo.count_whitelisted().await?;

    let mut factions = Vec::new();
    for faction in FactionRepository::new(&state.db).get_all().await? {
        let count = character_repo.count_live_in_faction(faction.id).await?;
        factions.push(faction.into_dto(count));
    }

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;
    let latest_status = ServerStatusRepository::new(&state.db)
        .latest()
        .await?
        .map(|s| s.into_dto());

    Ok((
        StatusCode::OK,
        Json(DashboardDto {
            applications,
            new_users,
            fully_linked,
            whitelisted,
            factions,
            servers: settings.server_list(),
            latest_status,
        }),
    ))
}

/// GET /api/admin/users - DataTables query over users
pub async fn users_data(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DataTableQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (users, filtered, total) = UserRepository::new(&state.db)
        .search_paginated(query.search_term(), query.start, query.length)
        .await?;

    let data: Vec<UserDto> = users.into_iter().map(|u| u.into_dto()).collect();

    Ok((
        StatusCode::OK,
        Json(DataTableResponse {
            data,
            records_filtered: filtered,
            records_total: total,
            draw: query.draw,
        }),
    ))
}

/// GET /api/admin/audit-logs - DataTables query over the audit trail
pub async fn audit_logs_data(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DataTableQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (entries, filtered, total) = AuditLogRepository::new(&state.db)
        .search_paginated(query.search_term(), query.start, query.length)
        .await?;

    let data: Vec<_> = entries
        .into_iter()
        .map(|(entry, username)| entry.into_dto(username))
        .collect();

    Ok((
        StatusCode::OK,
        Json(DataTableResponse {
            data,
            records_filtered: filtered,
            records_total: total,
            draw: query.draw,
        }),
    ))
}

/// GET /api/admin/tickets - Ticket queues for staff
pub async fn tickets(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TicketListQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let ticket_repo = TicketRepository::new(&state.db);
    let tickets = match query.filter.unwrap_or(TicketListFilter::Active) {
        TicketListFilter::Active => ticket_repo.get_active().await?,
        TicketListFilter::Answered => ticket_repo.get_by_status(TicketStatus::Answered).await?,
        TicketListFilter::Closed => ticket_repo.get_by_status(TicketStatus::Closed).await?,
    };

    let dtos = TicketService::new(&state.db)
        .with_department_names(tickets)
        .await?;

    Ok((StatusCode::OK, Json(dtos)))
}

/// GET /api/admin/applications - Applications by status, oldest first
pub async fn applications(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let applications: Vec<_> = ApplicationRepository::new(&state.db)
        .get_by_status(query.status)
        .await?
        .into_iter()
        .map(|a| a.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(applications)))
}

/// GET /api/admin/application/{id} - One application
pub async fn view_application(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let application = ApplicationRepository::new(&state.db)
        .find_by_id(application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}

/// POST /api/admin/application/{id}/accept - Accept an application
///
/// Whitelists the applicant, mints their character, emails them, and drops
/// any stale cached gate verdict so they can join immediately.
pub async fn accept_application(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (_application, user, _character) = ApplicationService::new(&state.db)
        .accept(application_id)
        .await?;

    let sent = state.mailer.send_application_accepted_email(&user.email).await?;
    if !sent {
        tracing::warn!("Could not send acceptance email to {}", user.email);
    }

    state.whitelist_cache.clear().await;
    if let Some(uuid) = user.minecraft_uuid.as_deref() {
        state.gate_cache.invalidate(&uuid.to_string()).await;
    }

    Ok((StatusCode::OK, Json(MessageDto::new("Application accepted"))))
}

/// POST /api/admin/application/{id}/reject - Reject with a reason
pub async fn reject_application(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
    Json(dto): Json<RejectApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ApplicationService::new(&state.db)
        .reject(application_id, dto.reason)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Application rejected"))))
}

/// POST /api/admin/user/{id}/whitelist
pub async fn whitelist_user(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_whitelisted(state, session, path, true, "User whitelisted").await
}

/// POST /api/admin/user/{id}/unwhitelist
pub async fn unwhitelist_user(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_whitelisted(state, session, path, false, "User unwhitelisted").await
}

/// POST /api/admin/user/{id}/ban
pub async fn ban_user(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_banned(state, session, path, true, "User banned").await
}

/// POST /api/admin/user/{id}/unban
pub async fn unban_user(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_banned(state, session, path, false, "User unbanned").await
}

/// POST /api/admin/user/{id}/roles - Grant or revoke staff/admin flags
///
/// Changes are written to the audit trail and announced on the dev
/// webhook.
pub async fn set_roles(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(dto): Json<SetRolesDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user_repo = UserRepository::new(&state.db);
    if user_repo.find_by_id(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let audit_repo = AuditLogRepository::new(&state.db);
    if let Some(is_staff) = dto.is_staff {
        user_repo.set_staff(user_id, is_staff).await?;
        audit_repo
            .create(CreateAuditLogParam {
                user_id: admin.id,
                action: AuditAction::StaffStatus(is_staff),
                target_type: Some("USER".to_string()),
                target_id: Some(user_id),
            })
            .await?;
    }
    if let Some(is_admin) = dto.is_admin {
        user_repo.set_admin(user_id, is_admin).await?;
        audit_repo
            .create(CreateAuditLogParam {
                user_id: admin.id,
                action: AuditAction::AdminStatus(is_admin),
                target_type: Some("USER".to_string()),
                target_id: Some(user_id),
            })
            .await?;
    }

    let user = user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;
    state.webhooks.dispatch(
        settings.webhook_url(WebhookKind::Dev).map(String::from),
        webhook::user_edited(&user, &admin),
    );

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// POST /api/admin/user/{id}/command - Queue a console command for the
/// user's next join
pub async fn queue_command(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(dto): Json<QueueCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    if dto.command.trim().is_empty() {
        return Err(AppError::BadRequest("Command not found".to_string()));
    }

    let user_repo = UserRepository::new(&state.db);
    if user_repo.find_by_id(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    CommandQueueRepository::new(&state.db)
        .create(user_id, &dto.command)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Command added"))))
}

/// POST /api/admin/faction - Create a faction
pub async fn create_faction(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateFactionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    if dto.name.trim().is_empty() {
        return Err(AppError::BadRequest("Faction name is required".to_string()));
    }

    let faction = FactionRepository::new(&state.db).create(&dto.name).await?;

    Ok((StatusCode::OK, Json(faction.into_dto(0))))
}

/// POST /api/admin/settings/applications - Quick applications toggle
///
/// Shortcut for the dashboard; goes through the settings service so the
/// memo is invalidated like any other settings write.
pub async fn toggle_applications(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<ApplicationsToggleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .set_applications_open(dto.open)
        .await?;

    let message = if settings.applications_open {
        "Applications opened"
    } else {
        "Applications closed"
    };

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}

/// GET /api/admin/settings - Full settings row
pub async fn get_settings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;

    Ok((StatusCode::OK, Json(settings)))
}

/// PUT /api/admin/settings - Replace the settings row
///
/// Invalidates the settings memo and announces the edit on the dev
/// webhook.
pub async fn update_settings(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<UpdateSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .update(UpdateSettingsParam {
            applications_open: dto.applications_open,
            can_register: dto.can_register,
            join_discord_on_register: dto.join_discord_on_register,
            maintenance_mode: dto.maintenance_mode,
            site_theme: dto.site_theme,
            min_application_length: dto.min_application_length,
            max_application_length: dto.max_application_length,
            panel_api_key: dto.panel_api_key,
            panel_api_url: dto.panel_api_url,
            live_server_uuid: dto.live_server_uuid,
            staging_server_uuid: dto.staging_server_uuid,
            fallback_server_uuid: dto.fallback_server_uuid,
            ticket_webhook: dto.ticket_webhook,
            application_webhook: dto.application_webhook,
            general_webhook: dto.general_webhook,
            dev_webhook: dto.dev_webhook,
        })
        .await?;

    state
        .webhooks
        .dispatch(settings.webhook_url(WebhookKind::Dev).map(String::from), webhook::settings_touched(&admin));

    Ok((StatusCode::OK, Json(MessageDto::new("Settings updated"))))
}

async fn set_whitelisted(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    whitelisted: bool,
    message: &str,
) -> Result<(StatusCode, Json<MessageDto>), AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user_repo = UserRepository::new(&state.db);
    let Some(user) = user_repo.find_by_id(user_id).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    user_repo.set_whitelisted(user_id, whitelisted).await?;

    state.whitelist_cache.clear().await;
    if let Some(uuid) = user.minecraft_uuid.as_deref() {
        state.gate_cache.invalidate(&uuid.to_string()).await;
    }

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}

async fn set_banned(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    banned: bool,
    message: &str,
) -> Result<(StatusCode, Json<MessageDto>), AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user_repo = UserRepository::new(&state.db);
    let Some(user) = user_repo.find_by_id(user_id).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    user_repo.set_banned(user_id, banned).await?;

    if let Some(uuid) = user.minecraft_uuid.as_deref() {
        state.gate_cache.invalidate(&uuid.to_string()).await;
    }

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}
