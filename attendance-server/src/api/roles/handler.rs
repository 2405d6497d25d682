//! Role API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::permissions::{PermissionInfo, all_permissions};
use crate::core::ServerState;
use crate::db::models::{Role, RoleCreate, RoleUpdate};
use crate::db::repository::RoleRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode, RepoResultExt};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Role>>> {
    let roles = RoleRepository::new(state.get_db()).find_all().await?;
    Ok(Json(roles))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Role>> {
    let role = RoleRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::RoleNotFound, format!("Role {} not found", id))
        })?;
    Ok(Json(role))
}

/// The seven flags and the permission string each grants
pub async fn permissions() -> Json<Vec<PermissionInfo>> {
    Json(all_permissions())
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoleCreate>,
) -> AppResult<(StatusCode, Json<Role>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.department, "department", MAX_NAME_LEN)?;

    let role = RoleRepository::new(state.get_db())
        .create(payload)
        .await
        .or_codes(ErrorCode::RoleNotFound, ErrorCode::RoleNameExists)?;

    tracing::info!(role = %role.name, department = %role.department, "Role created");
    Ok((StatusCode::CREATED, Json(role)))
}

/// Partial update; `permissions` replaces the whole flag set
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Json<Role>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(department) = &payload.department {
        validate_required_text(department, "department", MAX_NAME_LEN)?;
    }

    let role = RoleRepository::new(state.get_db())
        .update(&id, payload)
        .await
        .or_codes(ErrorCode::RoleNotFound, ErrorCode::RoleNameExists)?;

    tracing::info!(role = %role.name, "Role updated");
    Ok(Json(role))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    RoleRepository::new(state.get_db())
        .delete(&id)
        .await
        .or_codes(ErrorCode::RoleNotFound, ErrorCode::RoleNameExists)?;

    tracing::info!(role_id = %id, "Role deleted");
    Ok(Json(true))
}
