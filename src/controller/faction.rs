//! Faction endpoints. Public; the application form needs the list.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    data::{character::CharacterRepository, faction::FactionRepository},
    error::AppError,
    state::AppState,
};

/// GET /api/faction - All factions with live character counts
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let character_repo = CharacterRepository::new(&state.db);

    let mut factions = Vec::new();
    for faction in FactionRepository::new(&state.db).get_all().await? {
        let count = character_repo.count_live_in_faction(faction.id).await?;
        factions.push(faction.into_dto(count));
    }

    Ok((StatusCode::OK, Json(factions)))
}

/// GET /api/faction/{id} - One faction
pub async fn get(
    State(state): State<AppState>,
    Path(faction_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let faction = FactionRepository::new(&state.db)
        .find_by_id(faction_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Faction not found".to_string()))?;

    let count = CharacterRepository::new(&state.db)
        .count_live_in_faction(faction.id)
        .await?;

    Ok((StatusCode::OK, Json(faction.into_dto(count))))
}
