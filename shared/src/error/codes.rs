//! Unified error codes for the attendance service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Organization errors (employees, departments, roles)
//! - 4xxx: Task errors
//! - 5xxx: Attendance errors
//! - 6xxx: Schedule errors (lunch times)
//! - 7xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the web client can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Admin credentials are not configured
    AdminLoginDisabled = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Organization ====================
    /// Employee not found
    EmployeeNotFound = 3001,
    /// Employee email already registered
    EmployeeEmailExists = 3002,
    /// Department not found
    DepartmentNotFound = 3101,
    /// Department name already exists
    DepartmentNameExists = 3102,
    /// Role not found
    RoleNotFound = 3201,
    /// Role name already exists in the department
    RoleNameExists = 3202,

    // ==================== 4xxx: Task ====================
    /// Task not found
    TaskNotFound = 4001,
    /// Unknown task status
    TaskInvalidStatus = 4002,
    /// Unknown task priority
    TaskInvalidPriority = 4003,
    /// Due date could not be parsed
    TaskInvalidDueDate = 4004,

    // ==================== 5xxx: Attendance ====================
    /// Attendance type is not checkin/checkout
    AttendanceInvalidType = 5001,
    /// Image payload is not valid base64
    AttendanceInvalidImage = 5002,

    // ==================== 6xxx: Schedule ====================
    /// Lunch time not found
    LunchTimeNotFound = 6001,
    /// Employee already has a lunch time
    LunchTimeAlreadyAssigned = 6002,
    /// Time string is not HH:MM
    LunchTimeInvalidFormat = 6003,
    /// Weekday list is empty or contains unknown names
    LunchTimeInvalidDays = 6004,
    /// End time is not after start time
    LunchTimeInvalidRange = 6005,

    // ==================== 7xxx: Notification ====================
    /// Notification not found
    NotificationNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account has been disabled",
            ErrorCode::AdminLoginDisabled => "Admin login is not configured",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Organization
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee with this email already exists",
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::DepartmentNameExists => "Department name already exists",
            ErrorCode::RoleNotFound => "Role not found",
            ErrorCode::RoleNameExists => "Role already exists in this department",

            // Task
            ErrorCode::TaskNotFound => "Task not found",
            ErrorCode::TaskInvalidStatus => "Invalid task status",
            ErrorCode::TaskInvalidPriority => "Invalid task priority",
            ErrorCode::TaskInvalidDueDate => "Invalid due date",

            // Attendance
            ErrorCode::AttendanceInvalidType => {
                "Invalid type. Must be \"checkin\" or \"checkout\""
            }
            ErrorCode::AttendanceInvalidImage => "Image data is not valid base64",

            // Schedule
            ErrorCode::LunchTimeNotFound => "Lunch time not found",
            ErrorCode::LunchTimeAlreadyAssigned => "Lunch time already assigned to this employee",
            ErrorCode::LunchTimeInvalidFormat => "Time must be in HH:MM format",
            ErrorCode::LunchTimeInvalidDays => "Days must be a non-empty list of weekday names",
            ErrorCode::LunchTimeInvalidRange => "End time must be after start time",

            // Notification
            ErrorCode::NotificationNotFound => "Notification not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::AdminLoginDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Organization
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmployeeEmailExists),
            3101 => Ok(ErrorCode::DepartmentNotFound),
            3102 => Ok(ErrorCode::DepartmentNameExists),
            3201 => Ok(ErrorCode::RoleNotFound),
            3202 => Ok(ErrorCode::RoleNameExists),

            // Task
            4001 => Ok(ErrorCode::TaskNotFound),
            4002 => Ok(ErrorCode::TaskInvalidStatus),
            4003 => Ok(ErrorCode::TaskInvalidPriority),
            4004 => Ok(ErrorCode::TaskInvalidDueDate),

            // Attendance
            5001 => Ok(ErrorCode::AttendanceInvalidType),
            5002 => Ok(ErrorCode::AttendanceInvalidImage),

            // Schedule
            6001 => Ok(ErrorCode::LunchTimeNotFound),
            6002 => Ok(ErrorCode::LunchTimeAlreadyAssigned),
            6003 => Ok(ErrorCode::LunchTimeInvalidFormat),
            6004 => Ok(ErrorCode::LunchTimeInvalidDays),
            6005 => Ok(ErrorCode::LunchTimeInvalidRange),

            // Notification
            7001 => Ok(ErrorCode::NotificationNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::EmployeeEmailExists.code(), 3002);
        assert_eq!(ErrorCode::RoleNameExists.code(), 3202);
        assert_eq!(ErrorCode::TaskNotFound.code(), 4001);
        assert_eq!(ErrorCode::AttendanceInvalidType.code(), 5001);
        assert_eq!(ErrorCode::LunchTimeAlreadyAssigned.code(), 6002);
        assert_eq!(ErrorCode::NotificationNotFound.code(), 7001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trips_every_known_code() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::AccountDisabled,
            ErrorCode::AdminLoginDisabled,
            ErrorCode::PermissionDenied,
            ErrorCode::AdminRequired,
            ErrorCode::EmployeeNotFound,
            ErrorCode::EmployeeEmailExists,
            ErrorCode::DepartmentNotFound,
            ErrorCode::DepartmentNameExists,
            ErrorCode::RoleNotFound,
            ErrorCode::RoleNameExists,
            ErrorCode::TaskNotFound,
            ErrorCode::TaskInvalidStatus,
            ErrorCode::TaskInvalidPriority,
            ErrorCode::TaskInvalidDueDate,
            ErrorCode::AttendanceInvalidType,
            ErrorCode::AttendanceInvalidImage,
            ErrorCode::LunchTimeNotFound,
            ErrorCode::LunchTimeAlreadyAssigned,
            ErrorCode::LunchTimeInvalidFormat,
            ErrorCode::LunchTimeInvalidDays,
            ErrorCode::LunchTimeInvalidRange,
            ErrorCode::NotificationNotFound,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(8001), Err(InvalidErrorCode(8001)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::TaskNotFound).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("6002").unwrap();
        assert_eq!(code, ErrorCode::LunchTimeAlreadyAssigned);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::EmployeeNotFound.to_string(), "3001");
    }
}
