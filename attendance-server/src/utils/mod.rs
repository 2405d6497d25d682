//! Utilities - shared helpers and types
//!
//! - [`AppError`] / [`ErrorBody`] (from shared::error)
//! - logging, input validation, date parsing, CSV output

pub mod csv;
pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode, RepoResultExt};
