//! Lookups shared by several handlers

use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::repository::{EmployeeRepository, employee, parse_record_id};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Parse an employee id (`key` or `employee:key`)
pub fn employee_record_id(raw: &str) -> AppResult<RecordId> {
    Ok(parse_record_id(employee::TABLE, raw)?)
}

/// Load an employee, 404 when missing
pub async fn find_employee(state: &ServerState, raw_id: &str) -> AppResult<Employee> {
    let thing = employee_record_id(raw_id)?;
    EmployeeRepository::new(state.get_db())
        .find_by_record(thing)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::EmployeeNotFound,
                format!("Employee {} not found", raw_id),
            )
        })
}

/// Whether `raw_id` names the caller's own employee record
pub fn is_self(user: &CurrentUser, raw_id: &str) -> bool {
    employee_record_id(raw_id).is_ok_and(|thing| user.is_self(&thing.to_string()))
}

/// Employee record id of the caller; the admin token has none
pub fn caller_record_id(user: &CurrentUser) -> AppResult<RecordId> {
    if user.is_admin() {
        return Err(AppError::validation(
            "The admin account has no employee record; pass employee_id",
        ));
    }
    employee_record_id(&user.id)
}
