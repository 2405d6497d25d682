//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use crate::db::repository::EmployeeRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_optional_text, validate_password,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, RepoResultExt};

fn validate_create(payload: &EmployeeCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_optional_text(&payload.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&payload.role, "role", MAX_NAME_LEN)?;
    validate_optional_text(&payload.position, "position", MAX_NAME_LEN)?;
    Ok(())
}

fn validate_update(payload: &EmployeeUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    if let Some(password) = &payload.password {
        validate_password(password)?;
    }
    validate_optional_text(&payload.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&payload.role, "role", MAX_NAME_LEN)?;
    validate_optional_text(&payload.position, "position", MAX_NAME_LEN)?;
    Ok(())
}

/// List active employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = EmployeeRepository::new(state.get_db()).find_all().await?;
    Ok(Json(employees))
}

/// List all employees including inactive
pub async fn list_with_inactive(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = EmployeeRepository::new(state.get_db())
        .find_all_with_inactive()
        .await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = EmployeeRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::EmployeeNotFound,
                format!("Employee {} not found", id),
            )
        })?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    validate_create(&payload)?;

    let employee = EmployeeRepository::new(state.get_db())
        .create(payload)
        .await
        .or_codes(ErrorCode::EmployeeNotFound, ErrorCode::EmployeeEmailExists)?;

    tracing::info!(employee_id = %employee.id_string(), "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    validate_update(&payload)?;

    let employee = EmployeeRepository::new(state.get_db())
        .update(&id, payload)
        .await
        .or_codes(ErrorCode::EmployeeNotFound, ErrorCode::EmployeeEmailExists)?;

    tracing::info!(employee_id = %employee.id_string(), "Employee updated");
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    EmployeeRepository::new(state.get_db())
        .delete(&id)
        .await
        .or_codes(ErrorCode::EmployeeNotFound, ErrorCode::EmployeeEmailExists)?;

    tracing::info!(employee_id = %id, "Employee deleted");
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_fields() {
        let missing_name = EmployeeCreate {
            email: "a@example.com".into(),
            password: "secret1".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_create(&missing_name).unwrap_err().code,
            ErrorCode::RequiredField
        );

        let bad_email = EmployeeCreate {
            name: "Ann".into(),
            email: "nope".into(),
            password: "secret1".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_create(&bad_email).unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        assert!(validate_update(&EmployeeUpdate::default()).is_ok());
        let blank_name = EmployeeUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(validate_update(&blank_name).is_err());
    }
}
