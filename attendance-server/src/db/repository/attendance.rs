//! Attendance Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{AttendanceRecord, AttendanceType};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "attendance";

/// Default size of the "recent records" list
pub const RECENT_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct AttendanceRepository {
    base: BaseRepository,
}

fn employee_filter(employee: &Option<RecordId>) -> &'static str {
    if employee.is_some() {
        " WHERE employee = $employee"
    } else {
        ""
    }
}

impl AttendanceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Record an event stamped with the current server time
    pub async fn create(
        &self,
        employee: RecordId,
        employee_name: String,
        kind: AttendanceType,
        image_data: Option<String>,
    ) -> RepoResult<AttendanceRecord> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE attendance SET
                    employee = $employee,
                    employee_name = $employee_name,
                    `type` = $kind,
                    timestamp = $now,
                    image_data = $image_data
                RETURN AFTER"#,
            )
            .bind(("employee", employee))
            .bind(("employee_name", employee_name))
            .bind(("kind", kind.as_str()))
            .bind(("now", now_millis()))
            .bind(("image_data", image_data))
            .await?;

        let created: Option<AttendanceRecord> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to record attendance".to_string()))
    }

    /// Newest first, at most `limit` records
    pub async fn recent(
        &self,
        employee: Option<RecordId>,
        limit: u32,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT * FROM attendance{} ORDER BY timestamp DESC LIMIT $limit",
            employee_filter(&employee)
        );
        let mut query = self.base.db().query(sql).bind(("limit", limit));
        if let Some(employee) = employee {
            query = query.bind(("employee", employee));
        }
        let records: Vec<AttendanceRecord> = query.await?.take(0)?;
        Ok(records)
    }

    pub async fn count(&self, employee: Option<RecordId>) -> RepoResult<u64> {
        let sql = format!(
            "SELECT count() AS total FROM attendance{} GROUP ALL",
            employee_filter(&employee)
        );
        let mut query = self.base.db().query(sql);
        if let Some(employee) = employee {
            query = query.bind(("employee", employee));
        }
        let row: Option<CountRow> = query.await?.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    /// One page (1-based), newest first, plus the total matching count
    pub async fn page(
        &self,
        employee: Option<RecordId>,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<AttendanceRecord>, u64)> {
        let total = self.count(employee.clone()).await?;
        let start = u64::from(page.saturating_sub(1)) * u64::from(limit);
        if start >= total {
            return Ok((Vec::new(), total));
        }

        let sql = format!(
            "SELECT * FROM attendance{} ORDER BY timestamp DESC LIMIT $limit START $start",
            employee_filter(&employee)
        );
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("limit", limit))
            .bind(("start", start));
        if let Some(employee) = employee {
            query = query.bind(("employee", employee));
        }
        let records: Vec<AttendanceRecord> = query.await?.take(0)?;
        Ok((records, total))
    }

    /// Every matching record, newest first
    pub async fn all_for_export(
        &self,
        employee: Option<RecordId>,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT * FROM attendance{} ORDER BY timestamp DESC",
            employee_filter(&employee)
        );
        let mut query = self.base.db().query(sql);
        if let Some(employee) = employee {
            query = query.bind(("employee", employee));
        }
        let records: Vec<AttendanceRecord> = query.await?.take(0)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> AttendanceRepository {
        let db = DbService::memory().await.unwrap();
        AttendanceRepository::new(db.db)
    }

    fn emp(key: &str) -> RecordId {
        RecordId::from_table_key("employee", key)
    }

    #[tokio::test]
    async fn test_create_stamps_server_time() {
        let repo = repo().await;
        let before = now_millis();
        let record = repo
            .create(emp("ann"), "Ann".into(), AttendanceType::Checkin, None)
            .await
            .unwrap();
        assert!(record.timestamp >= before);
        assert_eq!(record.kind, AttendanceType::Checkin);
        assert_eq!(record.employee_name, "Ann");
        assert!(!record.has_image());
    }

    #[tokio::test]
    async fn test_recent_filters_by_employee() {
        let repo = repo().await;
        for _ in 0..3 {
            repo.create(emp("ann"), "Ann".into(), AttendanceType::Checkin, None)
                .await
                .unwrap();
        }
        repo.create(emp("bob"), "Bob".into(), AttendanceType::Checkout, None)
            .await
            .unwrap();

        let ann = repo.recent(Some(emp("ann")), RECENT_LIMIT).await.unwrap();
        assert_eq!(ann.len(), 3);
        assert!(ann.iter().all(|r| r.employee == emp("ann")));
        assert!(ann.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

        assert_eq!(repo.recent(None, 2).await.unwrap().len(), 2);
        assert_eq!(repo.count(None).await.unwrap(), 4);
        assert_eq!(repo.count(Some(emp("bob"))).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_page_sizes() {
        let repo = repo().await;
        for _ in 0..5 {
            repo.create(emp("ann"), "Ann".into(), AttendanceType::Checkin, None)
                .await
                .unwrap();
        }

        let (first, total) = repo.page(None, 1, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(first.len(), 2);

        let (last, _) = repo.page(None, 3, 2).await.unwrap();
        assert_eq!(last.len(), 1);

        let (beyond, _) = repo.page(None, 4, 2).await.unwrap();
        assert!(beyond.is_empty());

        let (far, total) = repo.page(None, u32::MAX, 100).await.unwrap();
        assert!(far.is_empty());
        assert_eq!(total, 5);

        assert_eq!(repo.all_for_export(None).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_count_empty_table() {
        let repo = repo().await;
        assert_eq!(repo.count(None).await.unwrap(), 0);
        let (records, total) = repo.page(None, 1, 20).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(total, 0);
    }
}
