//! Attendance Server - employee attendance and task management service
//!
//! # Architecture
//!
//! - **Database** (`db`): embedded SurrealDB storage, schema and seed data
//! - **Auth** (`auth`): JWT + Argon2 authentication, role-derived permissions
//! - **HTTP API** (`api`): one JSON REST module per resource
//! - **Services** (`services`): router assembly and the HTTP listener
//!
//! # Layout
//!
//! ```text
//! attendance-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # JWT, permissions, middleware
//! ├── api/           # routes and handlers
//! ├── services/      # HTTP service
//! ├── utils/         # logger, validation, time, csv
//! └── db/            # models, repositories, schema
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorBody, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, prepare the work directory and start logging.
///
/// Must run before [`Config::from_env`] so values from `.env` are visible.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
    let log_dir = std::path::Path::new(&work_dir).join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok());
    init_logger_with_file(log_level.as_deref(), json, log_dir.to_str());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___   __  __                 __
   /   | / /_/ /____  ____  ____/ /___ _____  ________
  / /| |/ __/ __/ _ \/ __ \/ __  / __ `/ __ \/ ___/ _ \
 / ___ / /_/ /_/  __/ / / / /_/ / /_/ / / / / /__/  __/
/_/  |_\__/\__/\___/_/ /_/\__,_/\__,_/_/ /_/\___/\___/
    "#
    );
}
