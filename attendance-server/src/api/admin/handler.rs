//! Admin API Handlers

use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use ring::hmac;
use ring::rand::SystemRandom;

use crate::api::lookup::{employee_record_id, is_self};
use crate::auth::CurrentUser;
use crate::auth::jwt::ADMIN_ID;
use crate::auth::permissions::{ALL, REPORTS_VIEW};
use crate::core::ServerState;
use crate::db::models::{AttendancePage, AttendancePageQuery};
use crate::db::repository::AttendanceRepository;
use crate::security_log;
use crate::utils::csv::attendance_csv;
use crate::utils::{AppError, AppResult, ErrorCode};

use shared::client::{AdminLoginRequest, AdminLoginResponse, UserInfo};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;
const EXPORT_FILENAME: &str = "attendance-records.csv";

/// Constant-time comparison: HMAC both sides under a one-off key
fn credentials_match(given: &str, expected: &str) -> AppResult<bool> {
    let key = hmac::Key::generate(hmac::HMAC_SHA256, &SystemRandom::new())
        .map_err(|_| AppError::internal("Failed to generate comparison key"))?;
    let tag = hmac::sign(&key, expected.as_bytes());
    Ok(hmac::verify(&key, given.as_bytes(), tag.as_ref()).is_ok())
}

/// Admin login against the configured credentials
///
/// 403 when no admin credentials are configured.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    if req.username.trim().is_empty() {
        return Err(AppError::required("username"));
    }
    if req.password.is_empty() {
        return Err(AppError::required("password"));
    }

    let (username, password) = state
        .config
        .admin_credentials()
        .ok_or_else(|| AppError::new(ErrorCode::AdminLoginDisabled))?;

    tokio::time::sleep(Duration::from_millis(state.config.login_delay_ms)).await;

    let user_ok = credentials_match(req.username.trim(), username)?;
    let pass_ok = credentials_match(&req.password, password)?;
    if !(user_ok && pass_ok) {
        security_log!(
            "WARN",
            "admin_login_failed",
            username = req.username.clone()
        );
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_admin_token(username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    security_log!("INFO", "admin_login", username = username.to_string());

    Ok(Json(AdminLoginResponse {
        token,
        user: UserInfo {
            id: ADMIN_ID.to_string(),
            name: username.to_string(),
            role: ADMIN_ID.to_string(),
            permissions: vec![ALL.to_string()],
            is_admin: true,
        },
    }))
}

/// Clamp page to >= 1 and limit to 1..=100
fn page_params(query: &AttendancePageQuery) -> (u32, u32) {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

/// Paginated attendance, newest first
///
/// Employees may page through their own records; anything else needs
/// `reports:view`.
pub async fn attendance_page(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AttendancePageQuery>,
) -> AppResult<Json<AttendancePage>> {
    let employee_id = query
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let own_query = employee_id.is_some_and(|id| is_self(&user, id));
    if !own_query && !user.has_permission(REPORTS_VIEW) {
        return Err(AppError::forbidden(format!(
            "Permission denied: {}",
            REPORTS_VIEW
        )));
    }

    let employee = employee_id.map(employee_record_id).transpose()?;
    let (page, limit) = page_params(&query);

    let (attendance, total) = AttendanceRepository::new(state.get_db())
        .page(employee, page, limit)
        .await?;

    Ok(Json(AttendancePage {
        attendance,
        total_pages: total.div_ceil(u64::from(limit)),
        current_page: u64::from(page),
        total,
    }))
}

/// All matching attendance as a CSV attachment
pub async fn export_attendance(
    State(state): State<ServerState>,
    Query(query): Query<AttendancePageQuery>,
) -> AppResult<impl IntoResponse> {
    let employee = query
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(employee_record_id)
        .transpose()?;

    let records = AttendanceRepository::new(state.get_db())
        .all_for_export(employee)
        .await?;

    tracing::info!(count = records.len(), "Attendance exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        attendance_csv(&records),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_clamped() {
        let q = |page, limit| AttendancePageQuery {
            page,
            limit,
            employee_id: None,
        };
        assert_eq!(page_params(&q(None, None)), (1, 10));
        assert_eq!(page_params(&q(Some(0), Some(0))), (1, 1));
        assert_eq!(page_params(&q(Some(3), Some(500))), (3, 100));
    }

    #[test]
    fn test_credentials_match() {
        assert!(credentials_match("admin", "admin").unwrap());
        assert!(!credentials_match("admin", "admin2").unwrap());
        assert!(!credentials_match("", "admin").unwrap());
    }
}
