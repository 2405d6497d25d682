//! Authentication Handlers
//!
//! Employee login and the current-user endpoint

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::auth::password::verify_password;
use crate::auth::permissions::{default_employee_permissions, permissions_from_flags};
use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::repository::{EmployeeRepository, RoleRepository};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

use shared::client::{EmployeeInfo, LoginRequest, LoginResponse, UserInfo};

/// Permission strings for an employee's role
///
/// Role in the employee's department first, then the same role name in
/// any department, then check-in only.
pub(crate) async fn resolve_permissions(
    state: &ServerState,
    employee: &Employee,
) -> AppResult<Vec<String>> {
    let roles = RoleRepository::new(state.get_db());

    let role = match roles
        .find_by_name_and_department(&employee.role, &employee.department)
        .await?
    {
        Some(role) => Some(role),
        None => roles.find_by_name(&employee.role).await?,
    };

    Ok(role
        .map(|r| permissions_from_flags(&r.permissions))
        .unwrap_or_else(default_employee_permissions))
}

/// Login handler
///
/// Unknown email and wrong password produce the same error. Every reply
/// waits the configured login delay first.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if req.email.trim().is_empty() {
        return Err(AppError::required("email"));
    }
    if req.password.is_empty() {
        return Err(AppError::required("password"));
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.find_by_email(&req.email).await?;

    tokio::time::sleep(Duration::from_millis(state.config.login_delay_ms)).await;

    let email = req.email.trim().to_lowercase();
    let employee = match employee {
        Some(e) => {
            let password_valid = verify_password(&req.password, &e.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !password_valid {
                security_log!("WARN", "login_failed", email = email, reason = "invalid_password");
                return Err(AppError::invalid_credentials());
            }
            if !e.is_active {
                security_log!("WARN", "login_failed", email = email, reason = "account_disabled");
                return Err(AppError::new(ErrorCode::AccountDisabled));
            }
            e
        }
        None => {
            security_log!("WARN", "login_failed", email = email, reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        }
    };

    let permissions = resolve_permissions(&state, &employee).await?;
    let user_id = employee.id_string();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &employee.name, &employee.role, &permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        employee_id = %user_id,
        role = %employee.role,
        "Employee logged in"
    );

    Ok(Json(LoginResponse {
        token,
        employee: EmployeeInfo {
            id: user_id,
            name: employee.name,
            email: employee.email,
            position: employee.position,
            department: employee.department,
            role: employee.role,
            permissions,
        },
    }))
}

/// Identity carried by the caller's token
pub async fn me(user: CurrentUser) -> Json<UserInfo> {
    Json(UserInfo {
        id: user.id,
        name: user.name,
        role: user.role,
        permissions: user.permissions,
        is_admin: user.is_admin,
    })
}
