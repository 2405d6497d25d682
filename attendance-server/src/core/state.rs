use std::sync::Arc;
use std::time::Instant;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, DatabaseEngine, Result};
use crate::db::DbService;

/// Shared state handed to every handler
///
/// Cloning is cheap: the database handle is internally reference counted
/// and the JWT service sits behind an `Arc`.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | immutable settings |
/// | db | Surreal<Db> | embedded database |
/// | jwt_service | Arc<JwtService> | token issue/verify |
/// | started_at | Instant | uptime reference |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub started_at: Instant,
}

impl ServerState {
    /// Build state from an already opened database
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            started_at: Instant::now(),
        }
    }

    /// Initialize server state
    ///
    /// In order:
    /// 1. work directory structure
    /// 2. database (`work_dir/database/attendance.db` or in-memory)
    /// 3. schema and, when enabled, default departments and roles
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_service = match config.database_engine {
            DatabaseEngine::File => {
                let db_path = config.database_dir().join("attendance.db");
                DbService::open(&db_path.to_string_lossy()).await?
            }
            DatabaseEngine::Memory => DbService::memory().await?,
        };

        if config.seed_defaults {
            db_service.seed_defaults().await?;
        }

        Ok(Self::new(config.clone(), db_service.db))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
