//! Lunch Time Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{LunchTime, LunchTimeFields};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "lunch_time";

#[derive(Clone)]
pub struct LunchTimeRepository {
    base: BaseRepository,
}

impl LunchTimeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All schedules (or one employee's), by employee name
    pub async fn find_all(&self, employee: Option<RecordId>) -> RepoResult<Vec<LunchTime>> {
        let lunch_times: Vec<LunchTime> = match employee {
            Some(employee) => self
                .base
                .db()
                .query("SELECT * FROM lunch_time WHERE employee = $employee ORDER BY employee_name")
                .bind(("employee", employee))
                .await?
                .take(0)?,
            None => self
                .base
                .db()
                .query("SELECT * FROM lunch_time ORDER BY employee_name")
                .await?
                .take(0)?,
        };
        Ok(lunch_times)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<LunchTime>> {
        let thing = parse_record_id(TABLE, id)?;
        let lunch: Option<LunchTime> = self.base.db().select(thing).await?;
        Ok(lunch)
    }

    pub async fn find_by_employee(&self, employee: RecordId) -> RepoResult<Option<LunchTime>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM lunch_time WHERE employee = $employee LIMIT 1")
            .bind(("employee", employee))
            .await?;
        let lunch_times: Vec<LunchTime> = result.take(0)?;
        Ok(lunch_times.into_iter().next())
    }

    /// Create a schedule; one per employee
    pub async fn create(&self, fields: LunchTimeFields) -> RepoResult<LunchTime> {
        if self.find_by_employee(fields.employee.clone()).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Employee {} already has a lunch time",
                fields.employee
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE lunch_time SET
                    employee = $employee,
                    employee_name = $employee_name,
                    start_time = $start_time,
                    end_time = $end_time,
                    days = $days,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("employee", fields.employee))
            .bind(("employee_name", fields.employee_name))
            .bind(("start_time", fields.start_time))
            .bind(("end_time", fields.end_time))
            .bind(("days", fields.days))
            .bind(("now", now_millis()))
            .await?;

        let created: Option<LunchTime> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create lunch time".to_string()))
    }

    /// Replace the schedule's fields with the merged, validated set
    pub async fn update(&self, id: &str, fields: LunchTimeFields) -> RepoResult<LunchTime> {
        let thing = parse_record_id(TABLE, id)?;

        if let Some(other) = self.find_by_employee(fields.employee.clone()).await?
            && other.id.as_ref() != Some(&thing)
        {
            return Err(RepoError::Duplicate(format!(
                "Employee {} already has a lunch time",
                fields.employee
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    employee = $employee,
                    employee_name = $employee_name,
                    start_time = $start_time,
                    end_time = $end_time,
                    days = $days,
                    updated_at = $now
                WHERE id = $thing
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("employee", fields.employee))
            .bind(("employee_name", fields.employee_name))
            .bind(("start_time", fields.start_time))
            .bind(("end_time", fields.end_time))
            .bind(("days", fields.days))
            .bind(("now", now_millis()))
            .await?;

        let updated: Vec<LunchTime> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Lunch time {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(TABLE, id)?;
        self.base.delete_record(thing, "Lunch time").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> LunchTimeRepository {
        let db = DbService::memory().await.unwrap();
        LunchTimeRepository::new(db.db)
    }

    fn fields(key: &str, name: &str) -> LunchTimeFields {
        LunchTimeFields {
            employee: RecordId::from_table_key("employee", key),
            employee_name: name.into(),
            start_time: "12:00".into(),
            end_time: "13:00".into(),
            days: vec!["Monday".into(), "Friday".into()],
        }
    }

    #[tokio::test]
    async fn test_one_schedule_per_employee() {
        let repo = repo().await;
        repo.create(fields("ann", "Ann")).await.unwrap();
        assert!(matches!(
            repo.create(fields("ann", "Ann")).await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_by_name_and_filtered() {
        let repo = repo().await;
        repo.create(fields("zed", "Zed")).await.unwrap();
        repo.create(fields("ann", "Ann")).await.unwrap();

        let names: Vec<String> = repo
            .find_all(None)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.employee_name)
            .collect();
        assert_eq!(names, vec!["Ann", "Zed"]);

        let zed = repo
            .find_all(Some(RecordId::from_table_key("employee", "zed")))
            .await
            .unwrap();
        assert_eq!(zed.len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_employee_with_schedule_rejected() {
        let repo = repo().await;
        repo.create(fields("ann", "Ann")).await.unwrap();
        let bob = repo.create(fields("bob", "Bob")).await.unwrap();
        let bob_id = bob.id.unwrap().to_string();

        assert!(matches!(
            repo.update(&bob_id, fields("ann", "Ann")).await,
            Err(RepoError::Duplicate(_))
        ));

        let mut changed = fields("bob", "Bob");
        changed.end_time = "13:30".into();
        let updated = repo.update(&bob_id, changed).await.unwrap();
        assert_eq!(updated.end_time, "13:30");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let lunch = repo.create(fields("ann", "Ann")).await.unwrap();
        let id = lunch.id.unwrap().to_string();
        repo.delete(&id).await.unwrap();
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_one() {
        let repo = repo().await;
        let mut set = tokio::task::JoinSet::new();
        for i in 0..8 {
            let repo = repo.clone();
            set.spawn(async move { repo.create(fields("ann", &format!("Ann {i}"))).await });
        }

        let mut created = 0;
        while let Some(joined) = set.join_next().await {
            match joined.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(e, RepoError::Duplicate(_)), "{e:?}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(repo.find_all(None).await.unwrap().len(), 1);
    }
}
