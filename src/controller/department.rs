//! Ticket department administration endpoints. All admin-only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    data::department::DepartmentRepository,
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{api::MessageDto, department::UpsertDepartmentParam},
    state::AppState,
};

#[derive(Deserialize)]
pub struct UpsertDepartmentDto {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_disabled: bool,
}

impl UpsertDepartmentDto {
    fn into_param(self) -> Result<UpsertDepartmentParam, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Department name is required".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Department description is required".to_string(),
            ));
        }

        Ok(UpsertDepartmentParam {
            name: self.name,
            description: self.description,
            is_hidden: self.is_hidden,
            is_disabled: self.is_disabled,
        })
    }
}

/// GET /api/admin/department - All departments
pub async fn list(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let departments: Vec<_> = DepartmentRepository::new(&state.db)
        .get_all()
        .await?
        .into_iter()
        .map(|d| d.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(departments)))
}

/// POST /api/admin/department - Create a department
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<UpsertDepartmentDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let department = DepartmentRepository::new(&state.db)
        .create(dto.into_param()?)
        .await?;

    Ok((StatusCode::OK, Json(department.into_dto())))
}

/// GET /api/admin/department/{id} - One department
pub async fn get(
    State(state): State<AppState>,
    session: Session,
    Path(department_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let department = DepartmentRepository::new(&state.db)
        .find_by_id(department_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok((StatusCode::OK, Json(department.into_dto())))
}

/// PUT /api/admin/department/{id} - Edit a department
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(department_id): Path<i32>,
    Json(dto): Json<UpsertDepartmentDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let repo = DepartmentRepository::new(&state.db);
    if repo.find_by_id(department_id).await?.is_none() {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    let department = repo.update(department_id, dto.into_param()?).await?;

    Ok((StatusCode::OK, Json(department.into_dto())))
}

/// POST /api/admin/department/{id}/hide
pub async fn hide(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_hidden(state, session, path, true, "Department hidden").await
}

/// POST /api/admin/department/{id}/unhide
pub async fn unhide(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_hidden(state, session, path, false, "Department unhidden").await
}

/// POST /api/admin/department/{id}/disable
pub async fn disable(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_disabled(state, session, path, true, "Department disabled").await
}

/// POST /api/admin/department/{id}/enable
pub async fn enable(
    state: State<AppState>,
    session: Session,
    path: Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_disabled(state, session, path, false, "Department enabled").await
}

/// DELETE /api/admin/department/{id}
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(department_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let repo = DepartmentRepository::new(&state.db);
    if repo.find_by_id(department_id).await?.is_none() {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    repo.delete(department_id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Department deleted"))))
}

async fn set_hidden(
    State(state): State<AppState>,
    session: Session,
    Path(department_id): Path<i32>,
    hidden: bool,
    message: &str,
) -> Result<(StatusCode, Json<MessageDto>), AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let repo = DepartmentRepository::new(&state.db);
    if repo.find_by_id(department_id).await?.is_none() {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    repo.set_hidden(department_id, hidden).await?;

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}

async fn set_disabled(
    State(state): State<AppState>,
    session: Session,
    Path(department_id): Path<i32>,
    disabled: bool,
    message: &str,
) -> Result<(StatusCode, Json<MessageDto>), AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let repo = DepartmentRepository::new(&state.db);
    if repo.find_by_id(department_id).await?.is_none() {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    repo.set_disabled(department_id, disabled).await?;

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}
