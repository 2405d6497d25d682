//! Database Module
//!
//! Embedded SurrealDB: SurrealKV files on disk, or in-memory for tests.

pub mod models;
pub mod repository;
mod seed;

use repository::{RepoError, RepoResult};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, SurrealKv};

const NAMESPACE: &str = "attendance";
const DATABASE: &str = "main";

/// Table and index definitions, applied on every start
const SCHEMA: &str = include_str!("schema.surql");

/// Database service
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `path`
    pub async fn open(path: &str) -> RepoResult<Self> {
        let db = Surreal::new::<SurrealKv>(path)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {}", e)))?;
        tracing::info!(path = %path, "Database opened");
        Self::init(db).await
    }

    /// Fresh in-memory database
    pub async fn memory() -> RepoResult<Self> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {}", e)))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> RepoResult<Self> {
        db.use_ns(NAMESPACE).use_db(DATABASE).await?;
        db.query(SCHEMA)
            .await?
            .check()
            .map_err(|e| RepoError::Database(format!("Failed to apply schema: {}", e)))?;
        tracing::debug!("Database schema applied");
        Ok(Self { db })
    }

    /// Seed default departments and roles into empty tables
    pub async fn seed_defaults(&self) -> RepoResult<()> {
        seed::seed_defaults(&self.db).await
    }

    /// Cheap liveness query
    pub async fn ping(db: &Surreal<Db>) -> RepoResult<()> {
        db.query("RETURN true").await?.check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let service = DbService::memory().await.unwrap();
        service.db.query(SCHEMA).await.unwrap().check().unwrap();
        DbService::ping(&service.db).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.db");
        let service = DbService::open(&path.to_string_lossy()).await.unwrap();
        DbService::ping(&service.db).await.unwrap();
    }
}
