//! Error handling
//!
//! Application errors come from `shared::error`; this module bridges
//! repository errors into them so handlers can use `?`.
//!
//! | RepoError | AppError code | HTTP |
//! |-----------|---------------|------|
//! | NotFound | NotFound | 404 |
//! | Duplicate | AlreadyExists | 409 |
//! | Validation | ValidationFailed | 400 |
//! | Database | DatabaseError | 500 |

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Resource-specific codes for repository failures
pub trait RepoResultExt<T> {
    /// Map NotFound / Duplicate to the given codes, the rest via `From`
    fn or_codes(self, not_found: ErrorCode, duplicate: ErrorCode) -> AppResult<T>;
}

impl<T> RepoResultExt<T> for Result<T, RepoError> {
    fn or_codes(self, not_found: ErrorCode, duplicate: ErrorCode) -> AppResult<T> {
        self.map_err(|err| match err {
            RepoError::NotFound(msg) => AppError::with_message(not_found, msg),
            RepoError::Duplicate(msg) => AppError::with_message(duplicate, msg),
            other => other.into(),
        })
    }
}
