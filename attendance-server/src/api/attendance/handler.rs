//! Attendance API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::lookup::{caller_record_id, find_employee, is_self};
use crate::auth::CurrentUser;
use crate::auth::permissions::REPORTS_VIEW;
use crate::core::ServerState;
use crate::db::models::{AttendanceCreate, AttendanceRecord, AttendanceType};
use crate::db::repository::AttendanceRepository;
use crate::db::repository::attendance::RECENT_LIMIT;
use crate::utils::validation::validate_image_data;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Record a check-in or check-out at server time
///
/// The employee defaults to the caller. Recording for someone else
/// needs `reports:view`.
pub async fn record(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<AttendanceCreate>,
) -> AppResult<(StatusCode, Json<AttendanceRecord>)> {
    let kind: AttendanceType = payload.kind.trim().parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::AttendanceInvalidType,
            format!(
                "Invalid attendance type '{}'. Must be checkin or checkout",
                payload.kind
            ),
        )
    })?;

    let image_data = payload.image_data.filter(|s| !s.is_empty());
    if let Some(image) = &image_data {
        validate_image_data(image)?;
    }

    let target = payload
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let employee = match target {
        Some(id) => {
            if !is_self(&user, id) && !user.has_permission(REPORTS_VIEW) {
                return Err(AppError::forbidden(
                    "Recording attendance for another employee is not allowed",
                ));
            }
            find_employee(&state, id).await?
        }
        None => find_employee(&state, &caller_record_id(&user)?.to_string()).await?,
    };

    let employee_id = employee
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Employee record has no id"))?;

    let record = AttendanceRepository::new(state.get_db())
        .create(employee_id, employee.name.clone(), kind, image_data)
        .await?;

    tracing::info!(
        employee_id = %record.employee,
        kind = record.kind.as_str(),
        has_image = record.has_image(),
        "Attendance recorded"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// The caller's most recent records, or everyone's with `reports:view`
pub async fn recent(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    let employee = if user.has_permission(REPORTS_VIEW) {
        None
    } else {
        Some(caller_record_id(&user)?)
    };

    let records = AttendanceRepository::new(state.get_db())
        .recent(employee, RECENT_LIMIT)
        .await?;
    Ok(Json(records))
}
