use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Storage engine for the embedded database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseEngine {
    /// SurrealKV files under `WORK_DIR/database`
    File,
    /// In-memory, lost on exit (tests, demos)
    Memory,
}

impl std::str::FromStr for DatabaseEngine {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "file" | "surrealkv" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(ServerError::Config(format!(
                "Unknown DATABASE_ENGINE '{}', expected 'file' or 'memory'",
                other
            ))),
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | database and logs root |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / production |
/// | DATABASE_ENGINE | file | `file` or `memory` |
/// | ADMIN_USERNAME | - | admin login name |
/// | ADMIN_PASSWORD | - | admin login password |
/// | LOGIN_DELAY_MS | 500 | fixed delay before every login reply |
/// | REQUEST_TIMEOUT_MS | 30000 | request timeout |
/// | SEED_DEFAULTS | true | seed departments and roles into empty tables |
///
/// JWT settings are read by [`JwtConfig::from_env`].
///
/// ```ignore
/// WORK_DIR=/srv/attendance HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT settings
    pub jwt: JwtConfig,
    /// development | production
    pub environment: String,
    pub database_engine: DatabaseEngine,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Fixed login delay (ms)
    pub login_delay_ms: u64,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Graceful shutdown window (ms)
    pub shutdown_timeout_ms: u64,
    pub seed_defaults: bool,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to defaults. Fails on a bad
    /// `DATABASE_ENGINE` or an unusable JWT secret.
    pub fn from_env() -> Result<Self> {
        let database_engine = std::env::var("DATABASE_ENGINE")
            .ok()
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(DatabaseEngine::File);

        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_parse("HTTP_PORT", 3000),
            jwt,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            database_engine,
            admin_username: env_non_empty("ADMIN_USERNAME"),
            admin_password: env_non_empty("ADMIN_PASSWORD"),
            login_delay_ms: env_parse("LOGIN_DELAY_MS", 500),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30000),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
            seed_defaults: env_parse("SEED_DEFAULTS", true),
        })
    }

    /// In-memory configuration for tests
    pub fn for_tests(jwt: JwtConfig) -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            jwt,
            environment: "test".into(),
            database_engine: DatabaseEngine::Memory,
            admin_username: None,
            admin_password: None,
            login_delay_ms: 0,
            request_timeout_ms: 30000,
            shutdown_timeout_ms: 1000,
            seed_defaults: true,
        }
    }

    /// Database directory: `{work_dir}/database`
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Log directory: `{work_dir}/logs`
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Admin credentials, only when both are configured
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Create the work directory tree if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.log_dir())?;
        if self.database_engine == DatabaseEngine::File {
            std::fs::create_dir_all(self.database_dir())?;
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
