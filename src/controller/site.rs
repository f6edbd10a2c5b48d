//! Public site metadata endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{error::AppError, service::settings::SettingsService, state::AppState};

/// GET /api/settings - Public settings subset
///
/// What any visitor may know: registration and application toggles,
/// maintenance mode, theme, and the application length bounds. Panel
/// credentials and webhook URLs stay admin-only.
pub async fn public_settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;

    Ok((StatusCode::OK, Json(settings.into_public_dto())))
}
