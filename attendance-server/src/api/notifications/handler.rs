//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::lookup::{caller_record_id, employee_record_id, find_employee, is_self};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Notification, NotificationCreate, NotificationQuery};
use crate::db::repository::NotificationRepository;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode, RepoResultExt};

/// Send a notification to an employee (admin only)
pub async fn send(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<NotificationCreate>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    if payload.to_employee_id.trim().is_empty() {
        return Err(AppError::required("to_employee_id"));
    }
    validate_required_text(&payload.message, "message", MAX_NOTE_LEN)?;

    let recipient = find_employee(&state, &payload.to_employee_id).await?;
    let recipient_id = employee_record_id(&recipient.id_string())?;

    let notification = NotificationRepository::new(state.get_db())
        .create(recipient_id, user.id.clone(), payload.message.trim().to_string())
        .await?;

    tracing::info!(
        to_employee = %notification.to_employee,
        from = %user.id,
        "Notification sent"
    );
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Unread notifications, newest first
///
/// Employees only read their own; the admin may read anyone's.
pub async fn unread(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<NotificationQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let requested = query
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let employee = match requested {
        Some(id) if is_self(&user, id) || user.is_admin() => employee_record_id(id)?,
        Some(_) => {
            return Err(AppError::forbidden(
                "You can only read your own notifications",
            ));
        }
        None => caller_record_id(&user)?,
    };

    let notifications = NotificationRepository::new(state.get_db())
        .unread_for(employee)
        .await?;
    Ok(Json(notifications))
}

/// Mark a notification read (recipient or admin)
pub async fn mark_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let repo = NotificationRepository::new(state.get_db());
    let notification = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::NotificationNotFound,
            format!("Notification {} not found", id),
        )
    })?;

    if !user.is_admin() && !user.is_self(&notification.to_employee.to_string()) {
        return Err(AppError::forbidden(
            "You can only mark your own notifications as read",
        ));
    }

    let notification = repo
        .mark_read(&id)
        .await
        .or_codes(ErrorCode::NotificationNotFound, ErrorCode::AlreadyExists)?;
    Ok(Json(notification))
}
