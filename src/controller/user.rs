//! Public user profile endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    data::{application::ApplicationRepository, character::CharacterRepository, user::UserRepository},
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{
        application::ApplicationDto,
        character::CharacterDto,
        user::{PublicUserDto, User},
    },
    service::mojang::MojangService,
    state::AppState,
};
use tower_sessions::Session;

/// Public profile: linking state, latest application, latest live
/// character.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileDto {
    pub user: PublicUserDto,
    pub is_whitelisted: bool,
    pub latest_application: Option<ApplicationDto>,
    pub latest_character: Option<CharacterDto>,
}

/// GET /api/user/{query} - Public profile lookup
///
/// The query is matched in order against: Minecraft UUID, Minecraft
/// username, portal username.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if query == "null" {
        return Err(AppError::BadRequest(
            "This user has not linked a Minecraft account.".to_string(),
        ));
    }

    let user_repo = UserRepository::new(&state.db);

    let mut user: Option<User> = None;
    if Uuid::parse_str(&query).is_ok() {
        user = user_repo.find_by_minecraft_uuid(&query).await?;
    }
    if user.is_none() {
        user = user_repo.find_by_minecraft_username(&query).await?;
    }
    if user.is_none() {
        user = user_repo.find_by_username(&query).await?;
    }

    let Some(user) = user else {
        return Err(AppError::NotFound(
            "User not found. It must be a valid UUID, Minecraft username, or portal username."
                .to_string(),
        ));
    };

    let latest_application = ApplicationRepository::new(&state.db)
        .latest_for_user(user.id)
        .await?
        .map(|a| a.into_dto());
    let latest_character = CharacterRepository::new(&state.db)
        .latest_live_for_user(user.id)
        .await?
        .map(|c| c.into_dto());

    let is_whitelisted = user.is_whitelisted;
    Ok((
        StatusCode::OK,
        Json(UserProfileDto {
            user: user.into_public_dto(),
            is_whitelisted,
            latest_application,
            latest_character,
        }),
    ))
}

/// GET /api/user/whitelisted - Public whitelist roster
///
/// Served from a 600 s memo; the roster changes rarely and the page is
/// linked from the public site.
pub async fn whitelisted_users(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(roster) = state.whitelist_cache.get(&()).await {
        return Ok((StatusCode::OK, Json(roster)));
    }

    let roster: Vec<PublicUserDto> = UserRepository::new(&state.db)
        .get_whitelisted()
        .await?
        .into_iter()
        .map(|u| u.into_public_dto())
        .collect();

    state.whitelist_cache.insert((), roster.clone()).await;

    Ok((StatusCode::OK, Json(roster)))
}

/// POST /api/user/refresh_minecraft - Re-fetch the Minecraft username
///
/// Pulls the current name from Mojang for the linked UUID, for players who
/// renamed their account.
pub async fn refresh_minecraft(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::MinecraftLinked])
        .await?;

    let Some(uuid) = user.minecraft_uuid.as_deref() else {
        return Err(crate::error::auth::AuthError::MinecraftNotLinked(user.id).into());
    };

    let new_username = MojangService::new(state.http_client.clone())
        .username_for_uuid(uuid)
        .await?;

    let user = UserRepository::new(&state.db)
        .set_minecraft_username(user.id, &new_username)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
