//! Lunch Time API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::lookup::{employee_record_id, find_employee};
use crate::core::ServerState;
use crate::db::models::{LunchTime, LunchTimeCreate, LunchTimeFields, LunchTimeQuery, LunchTimeUpdate};
use crate::db::repository::LunchTimeRepository;
use crate::utils::validation::{validate_days, validate_time_range};
use crate::utils::{AppError, AppResult, ErrorCode, RepoResultExt};
use surrealdb::RecordId;

fn lunch_time_not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::LunchTimeNotFound,
        format!("Lunch time {} not found", id),
    )
}

/// Validate times and days, then build fields for `employee`
fn schedule_fields(
    employee: RecordId,
    employee_name: String,
    start_time: &str,
    end_time: &str,
    days: &[String],
) -> AppResult<LunchTimeFields> {
    let start_time = start_time.trim();
    let end_time = end_time.trim();
    validate_time_range(start_time, end_time)?;
    let days = validate_days(days)?;

    Ok(LunchTimeFields {
        employee,
        employee_name,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        days,
    })
}

/// Look up the employee and copy their current name
async fn resolve_employee(state: &ServerState, employee_id: &str) -> AppResult<(RecordId, String)> {
    let employee = find_employee(state, employee_id).await?;
    Ok((employee_record_id(&employee.id_string())?, employee.name))
}

/// List lunch times by employee name, optionally for one employee
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<LunchTimeQuery>,
) -> AppResult<Json<Vec<LunchTime>>> {
    let employee = query
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(employee_record_id)
        .transpose()?;

    let lunch_times = LunchTimeRepository::new(state.get_db())
        .find_all(employee)
        .await?;
    Ok(Json(lunch_times))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<LunchTime>> {
    let lunch_time = LunchTimeRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| lunch_time_not_found(&id))?;
    Ok(Json(lunch_time))
}

/// Assign a lunch time; one per employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LunchTimeCreate>,
) -> AppResult<(StatusCode, Json<LunchTime>)> {
    for (field, value) in [
        ("employee_id", &payload.employee_id),
        ("start_time", &payload.start_time),
        ("end_time", &payload.end_time),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::required(field));
        }
    }
    if payload.days.is_empty() {
        return Err(AppError::required("days"));
    }

    let (employee, employee_name) = resolve_employee(&state, &payload.employee_id).await?;
    let fields = schedule_fields(
        employee,
        employee_name,
        &payload.start_time,
        &payload.end_time,
        &payload.days,
    )?;

    let lunch_time = LunchTimeRepository::new(state.get_db())
        .create(fields)
        .await
        .or_codes(ErrorCode::LunchTimeNotFound, ErrorCode::LunchTimeAlreadyAssigned)?;

    tracing::info!(
        employee_id = %lunch_time.employee,
        start = %lunch_time.start_time,
        end = %lunch_time.end_time,
        "Lunch time assigned"
    );
    Ok((StatusCode::CREATED, Json(lunch_time)))
}

/// Partial update; unset fields keep their stored values
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LunchTimeUpdate>,
) -> AppResult<Json<LunchTime>> {
    let repo = LunchTimeRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| lunch_time_not_found(&id))?;

    let requested = payload
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    // The stored employee may be gone; only a reassignment looks it up again
    let (employee, employee_name) = match requested {
        Some(raw) if employee_record_id(raw)? != existing.employee => {
            resolve_employee(&state, raw).await?
        }
        _ => (existing.employee, existing.employee_name),
    };

    let start_time = payload.start_time.unwrap_or(existing.start_time);
    let end_time = payload.end_time.unwrap_or(existing.end_time);
    let days = payload.days.unwrap_or(existing.days);

    let fields = schedule_fields(employee, employee_name, &start_time, &end_time, &days)?;

    let lunch_time = repo
        .update(&id, fields)
        .await
        .or_codes(ErrorCode::LunchTimeNotFound, ErrorCode::LunchTimeAlreadyAssigned)?;

    tracing::info!(lunch_time_id = %id, "Lunch time updated");
    Ok(Json(lunch_time))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    LunchTimeRepository::new(state.get_db())
        .delete(&id)
        .await
        .or_codes(ErrorCode::LunchTimeNotFound, ErrorCode::LunchTimeAlreadyAssigned)?;

    tracing::info!(lunch_time_id = %id, "Lunch time deleted");
    Ok(Json(true))
}
