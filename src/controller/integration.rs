//! Integration endpoints for the game servers and companion binaries.
//!
//! All of these accept the shared key in the `Authorization` header (or an
//! admin session) instead of a user login.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    data::{minecraft_auth::MinecraftAuthRepository, server_status::ServerStatusRepository},
    error::AppError,
    middleware::auth::ApiKeyGuard,
    model::api::MessageDto,
    service::{
        gate::ConnectionGateService, panel::PanelService, settings::SettingsService,
    },
    state::AppState,
};

#[derive(Deserialize)]
pub struct AuthCodeIntakeDto {
    pub uuid: String,
    pub display_name: String,
    pub auth_code: String,
}

/// Intake response carrying a previously issued code when the player
/// already has one waiting.
#[derive(Serialize)]
pub struct AuthCodeIntakeResponse {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
}

#[derive(Serialize)]
pub struct StatusIntakeResponse {
    pub msg: String,
    pub data: serde_json::Value,
}

/// POST /api/integration/minecraft/auth - Register a one-time auth code
///
/// Called by the auth gateway when a player joins the code server. The
/// distinguished error shapes let the gateway re-serve an existing code
/// ("UUID already exists") or regenerate on collision ("Auth code already
/// used").
pub async fn minecraft_auth_intake(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Json(dto): Json<AuthCodeIntakeDto>,
) -> Result<impl IntoResponse, AppError> {
    ApiKeyGuard::new(&state.db, &session, &state.auth_key)
        .require(&headers)
        .await?;

    if dto.uuid.is_empty() || dto.display_name.is_empty() || dto.auth_code.is_empty() {
        return Err(AppError::BadRequest("Missing data in request".to_string()));
    }

    let auth_repo = MinecraftAuthRepository::new(&state.db);

    // Player already has an unspent code; hand it back instead of minting
    // another.
    if let Some(existing) = auth_repo.find_unused_by_uuid(&dto.uuid).await? {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(AuthCodeIntakeResponse {
                msg: "UUID already exists".to_string(),
                auth_code: Some(existing.auth_code),
            }),
        ));
    }

    if let Some(collision) = auth_repo.find_by_code(&dto.auth_code).await? {
        if collision.is_used {
            // Spent rows are garbage; drop them so the code becomes usable
            // again later.
            auth_repo.delete(collision.id).await?;
        }
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(AuthCodeIntakeResponse {
                msg: "Auth code already used".to_string(),
                auth_code: None,
            }),
        ));
    }

    auth_repo
        .create(&dto.auth_code, &dto.uuid, &dto.display_name)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AuthCodeIntakeResponse {
            msg: "Auth code added".to_string(),
            auth_code: None,
        }),
    ))
}

/// GET /api/integration/minecraft/{uuid}/allow - Whitelist gate
///
/// Verdicts are memoized for 60 s per UUID. An allowed (uncached) verdict
/// kicks off the deferred command drain for that player.
pub async fn allow_connection(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(minecraft_uuid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ApiKeyGuard::new(&state.db, &session, &state.auth_key)
        .require(&headers)
        .await?;

    if let Some(verdict) = state.gate_cache.get(&minecraft_uuid).await {
        return Ok((StatusCode::OK, Json(verdict)));
    }

    let verdict = ConnectionGateService::new(&state.db)
        .allow_connection(&minecraft_uuid)
        .await?;

    state
        .gate_cache
        .insert(minecraft_uuid.clone(), verdict.clone())
        .await;

    if let Some(user_id) = verdict.user_id {
        let settings = SettingsService::new(&state.db, &state.settings_cache)
            .get()
            .await?;
        ConnectionGateService::spawn_command_drain(
            state.db.clone(),
            PanelService::new(state.http_client.clone()),
            settings,
            user_id,
        );
    }

    Ok((StatusCode::OK, Json(verdict)))
}

/// POST /api/integration/server-status - Store a status snapshot
///
/// Called by the status poller every minute with the raw panel data.
pub async fn update_server_status(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    ApiKeyGuard::new(&state.db, &session, &state.auth_key)
        .require(&headers)
        .await?;

    ServerStatusRepository::new(&state.db)
        .create(payload.clone())
        .await?;

    Ok((
        StatusCode::OK,
        Json(StatusIntakeResponse {
            msg: "Server status updated".to_string(),
            data: payload,
        }),
    ))
}

/// GET /api/integration/server-status/latest - Most recent snapshot
pub async fn latest_server_status(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    ApiKeyGuard::new(&state.db, &session, &state.auth_key)
        .require(&headers)
        .await?;

    let latest = ServerStatusRepository::new(&state.db)
        .latest()
        .await?
        .map(|s| s.into_dto());

    match latest {
        Some(status) => Ok((StatusCode::OK, Json(status)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(MessageDto::new("No status recorded yet")),
        )
            .into_response()),
    }
}
