//! Unified error system for the attendance service
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: JSON body rendered for every error
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Organization errors
//! - 4xxx: Task errors
//! - 5xxx: Attendance errors
//! - 6xxx: Schedule errors
//! - 7xxx: Notification errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::EmployeeNotFound);
//!
//! let err = AppError::validation("Missing required field")
//!     .with_detail("field", "email");
//!
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 2);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
