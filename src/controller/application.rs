//! Whitelist application endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    data::{application::ApplicationRepository, faction::FactionRepository},
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{application::CreateApplicationParam, settings::WebhookKind},
    service::{application::ApplicationService, settings::SettingsService, webhook},
    state::AppState,
};

#[derive(Deserialize)]
pub struct SubmitApplicationDto {
    pub faction_id: i32,
    pub character_name: String,
    pub character_race: String,
    pub character_class: String,
    pub backstory: String,
    pub description: String,
    pub rule_agreement: bool,
}

/// POST /api/application - Submit a whitelist application
///
/// Requires a fully linked account (Minecraft + Discord). The submission
/// gates live in the service; the rules checkbox is enforced here since
/// it's a pure form concern.
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<SubmitApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::MinecraftLinked, Permission::DiscordLinked])
        .await?;

    if !dto.rule_agreement {
        return Err(AppError::BadRequest(
            "You must agree to the rules!".to_string(),
        ));
    }

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;

    let application = ApplicationService::new(&state.db)
        .submit(
            &user,
            CreateApplicationParam {
                user_id: user.id,
                faction_id: dto.faction_id,
                character_name: dto.character_name,
                character_race: dto.character_race,
                character_class: dto.character_class,
                backstory: dto.backstory,
                description: dto.description,
            },
            &settings,
        )
        .await?;

    let faction_name = FactionRepository::new(&state.db)
        .find_by_id(application.faction_id)
        .await?
        .map(|f| f.name)
        .unwrap_or_default();
    state.webhooks.dispatch(
        settings.webhook_url(WebhookKind::Application).map(String::from),
        webhook::new_application(&application, &user, &faction_name),
    );

    Ok((StatusCode::OK, Json(application.into_dto())))
}

/// GET /api/application/mine - The caller's applications, newest first
pub async fn mine(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let applications: Vec<_> = ApplicationRepository::new(&state.db)
        .get_for_user(user.id)
        .await?
        .into_iter()
        .map(|a| a.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(applications)))
}
