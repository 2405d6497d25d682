use thiserror::Error;

use crate::db::repository::RepoError;

/// Startup and lifecycle errors
///
/// Request handling uses [`crate::AppError`]; this type covers what can go
/// wrong before the first request or while the listener runs.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] RepoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
