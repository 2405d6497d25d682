//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod attendance;
pub mod department;
pub mod employee;
pub mod lunch_time;
pub mod notification;
pub mod role;
pub mod task;

pub use attendance::AttendanceRepository;
pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use lunch_time::LunchTimeRepository;
pub use notification::NotificationRepository;
pub use role::RoleRepository;
pub use task::TaskRepository;

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // Unique index violation: "Database index `x` already contains ..."
        if message.contains("already contains") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: "table:key" on the wire
// =============================================================================
//
// Path and body ids accept either the bare key ("abc") or the full
// "employee:abc" form. Both resolve to the same RecordId.

/// Parse `raw` as a record of `table`
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RepoError::Validation(format!("Invalid {} ID: empty", table)));
    }

    if let Some(key) = raw.strip_prefix(table).and_then(|r| r.strip_prefix(':')) {
        if key.is_empty() {
            return Err(RepoError::Validation(format!("Invalid ID: {}", raw)));
        }
        let id: RecordId = raw
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", raw)))?;
        return Ok(id);
    }

    if raw.contains(':') {
        return Err(RepoError::Validation(format!(
            "Invalid {} ID: {}",
            table, raw
        )));
    }

    Ok(RecordId::from_table_key(table, raw))
}

/// Row shape of `SELECT count() AS total ... GROUP ALL`
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub total: u64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Delete a record, NotFound when it does not exist
    pub async fn delete_record(&self, thing: RecordId, what: &str) -> RepoResult<()> {
        let mut result = self
            .db
            .query("SELECT VALUE id FROM $thing")
            .bind(("thing", thing.clone()))
            .await?;
        let existing: Vec<RecordId> = result.take(0)?;
        if existing.is_empty() {
            return Err(RepoError::NotFound(format!("{} {} not found", what, thing)));
        }

        self.db
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?
            .check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_key() {
        let id = parse_record_id("employee", "abc123").unwrap();
        assert_eq!(id, RecordId::from_table_key("employee", "abc123"));
        assert_eq!(id.to_string(), "employee:abc123");
    }

    #[test]
    fn test_parse_full_form() {
        let id = parse_record_id("task", "task:xyz").unwrap();
        assert_eq!(id, RecordId::from_table_key("task", "xyz"));
    }

    #[test]
    fn test_parse_rejects_other_table_and_empty() {
        assert!(matches!(
            parse_record_id("task", "employee:xyz"),
            Err(RepoError::Validation(_))
        ));
        assert!(parse_record_id("task", "  ").is_err());
        assert!(parse_record_id("task", "task:").is_err());
    }

    // ========== Database-backed ==========

    use crate::db::DbService;

    async fn run(db: &Surreal<Db>, sql: &str) -> RepoResult<()> {
        db.query(sql).await?.check()?;
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_record_then_missing() {
        let db = DbService::memory().await.unwrap().db;
        run(&db, "CREATE department:ops SET name = 'Ops', created_at = 0, updated_at = 0")
            .await
            .unwrap();

        let base = BaseRepository::new(db.clone());
        let thing = RecordId::from_table_key("department", "ops");
        base.delete_record(thing.clone(), "Department").await.unwrap();

        let left: Vec<RecordId> = db
            .query("SELECT VALUE id FROM department")
            .await
            .unwrap()
            .take(0)
            .unwrap();
        assert!(left.is_empty());
        assert!(matches!(
            base.delete_record(thing, "Department").await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unique_indexes_map_to_duplicate() {
        let db = DbService::memory().await.unwrap().db;
        let cases = [
            "CREATE employee SET name = 'A', email = 'a@x.io', password_hash = 'h', \
             created_at = 0, updated_at = 0",
            "CREATE department SET name = 'Ops', created_at = 0, updated_at = 0",
            "CREATE role SET name = 'Lead', department = 'Ops', created_at = 0, updated_at = 0",
            "CREATE lunch_time SET employee = employee:ann, employee_name = 'Ann', \
             start_time = '12:00', end_time = '13:00', days = ['Monday'], \
             created_at = 0, updated_at = 0",
        ];

        for sql in cases {
            run(&db, sql).await.unwrap();
            let second = run(&db, sql).await;
            assert!(
                matches!(second, Err(RepoError::Duplicate(_))),
                "{sql}: {second:?}"
            );
        }
    }
}
