//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Department, DepartmentCreate, DepartmentUpdate};
use crate::db::repository::DepartmentRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, RepoResultExt};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepository::new(state.get_db()).find_all().await?;
    Ok(Json(departments))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Department>> {
    let department = DepartmentRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::DepartmentNotFound,
                format!("Department {} not found", id),
            )
        })?;
    Ok(Json(department))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<(StatusCode, Json<Department>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let department = DepartmentRepository::new(state.get_db())
        .create(payload)
        .await
        .or_codes(ErrorCode::DepartmentNotFound, ErrorCode::DepartmentNameExists)?;

    tracing::info!(department = %department.name, "Department created");
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DepartmentUpdate>,
) -> AppResult<Json<Department>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let department = DepartmentRepository::new(state.get_db())
        .update(&id, payload)
        .await
        .or_codes(ErrorCode::DepartmentNotFound, ErrorCode::DepartmentNameExists)?;
    Ok(Json(department))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    DepartmentRepository::new(state.get_db())
        .delete(&id)
        .await
        .or_codes(ErrorCode::DepartmentNotFound, ErrorCode::DepartmentNameExists)?;

    tracing::info!(department_id = %id, "Department deleted");
    Ok(Json(true))
}
