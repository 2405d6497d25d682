//! Notification Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Notification;
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "notification";

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        to_employee: RecordId,
        from_admin: String,
        message: String,
    ) -> RepoResult<Notification> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE notification SET
                    to_employee = $to_employee,
                    from_admin = $from_admin,
                    message = $message,
                    `read` = false,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("to_employee", to_employee))
            .bind(("from_admin", from_admin))
            .bind(("message", message))
            .bind(("now", now_millis()))
            .await?;

        let created: Option<Notification> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    /// Unread notifications for an employee, newest first
    pub async fn unread_for(&self, employee: RecordId) -> RepoResult<Vec<Notification>> {
        let notifications: Vec<Notification> = self
            .base
            .db()
            .query(
                "SELECT * FROM notification WHERE to_employee = $employee AND `read` = false \
                 ORDER BY created_at DESC",
            )
            .bind(("employee", employee))
            .await?
            .take(0)?;
        Ok(notifications)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Notification>> {
        let thing = parse_record_id(TABLE, id)?;
        let notification: Option<Notification> = self.base.db().select(thing).await?;
        Ok(notification)
    }

    pub async fn mark_read(&self, id: &str) -> RepoResult<Notification> {
        let thing = parse_record_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET `read` = true WHERE id = $thing RETURN AFTER")
            .bind(("thing", thing))
            .await?;
        let updated: Vec<Notification> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }
}
