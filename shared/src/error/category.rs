//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Organization errors
/// - 4xxx: Task errors
/// - 5xxx: Attendance errors
/// - 6xxx: Schedule errors
/// - 7xxx: Notification errors
/// - 8xxx and 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Employee, department and role errors (3xxx)
    Organization,
    /// Task errors (4xxx)
    Task,
    /// Attendance errors (5xxx)
    Attendance,
    /// Lunch schedule errors (6xxx)
    Schedule,
    /// Notification errors (7xxx)
    Notification,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Organization,
            4000..5000 => Self::Task,
            5000..6000 => Self::Attendance,
            6000..7000 => Self::Schedule,
            7000..8000 => Self::Notification,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
