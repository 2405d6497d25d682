//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::EmployeeNotFound
            | Self::DepartmentNotFound
            | Self::RoleNotFound
            | Self::TaskNotFound
            | Self::LunchTimeNotFound
            | Self::NotificationNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmployeeEmailExists
            | Self::DepartmentNameExists
            | Self::RoleNameExists
            | Self::LunchTimeAlreadyAssigned => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::AdminRequired | Self::AdminLoginDisabled => {
                StatusCode::FORBIDDEN
            }

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::EmployeeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::LunchTimeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::LunchTimeAlreadyAssigned.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::RoleNameExists.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AccountDisabled.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::AdminLoginDisabled.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::LunchTimeInvalidFormat.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::AttendanceInvalidType.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
