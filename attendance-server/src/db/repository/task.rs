//! Task Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{NewTask, ProgressUpdate, Task, TaskChanges, TaskStatus};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "task";

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

/// Due date ascending, then priority high to low
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| b.priority.cmp(&a.priority))
    });
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Tasks matching the optional filters, sorted by [`sort_tasks`]
    pub async fn find(
        &self,
        assigned_to: Option<RecordId>,
        status: Option<TaskStatus>,
    ) -> RepoResult<Vec<Task>> {
        let mut conditions = Vec::new();
        if assigned_to.is_some() {
            conditions.push("assigned_to = $assigned_to");
        }
        if status.is_some() {
            conditions.push("status = $status");
        }

        let mut sql = String::from("SELECT * FROM task");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let mut query = self.base.db().query(sql);
        if let Some(assignee) = assigned_to {
            query = query.bind(("assigned_to", assignee));
        }
        if let Some(status) = status {
            query = query.bind(("status", status.as_str()));
        }

        let mut tasks: Vec<Task> = query.await?.take(0)?;
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Task>> {
        let thing = parse_record_id(TABLE, id)?;
        let task: Option<Task> = self.base.db().select(thing).await?;
        Ok(task)
    }

    pub async fn create(&self, data: NewTask) -> RepoResult<Task> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE task SET
                    title = $title,
                    description = $description,
                    assigned_by = $assigned_by,
                    assigned_to = $assigned_to,
                    priority = $priority,
                    status = 'pending',
                    due_date = $due_date,
                    progress_updates = [],
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("title", data.title))
            .bind(("description", data.description))
            .bind(("assigned_by", data.assigned_by))
            .bind(("assigned_to", data.assigned_to))
            .bind(("priority", data.priority.as_str()))
            .bind(("due_date", data.due_date))
            .bind(("now", now))
            .await?;

        let created: Option<Task> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create task".to_string()))
    }

    pub async fn update(&self, id: &str, changes: TaskChanges) -> RepoResult<Task> {
        let thing = parse_record_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    title = $title OR title,
                    description = IF $has_description THEN $description ELSE description END,
                    assigned_to = $assigned_to OR assigned_to,
                    priority = $priority OR priority,
                    status = $status OR status,
                    due_date = IF $has_due_date THEN $due_date ELSE due_date END,
                    updated_at = $now
                WHERE id = $thing
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("title", changes.title))
            .bind(("has_description", changes.description.is_some()))
            .bind(("description", changes.description.unwrap_or_default()))
            .bind(("assigned_to", changes.assigned_to))
            .bind(("priority", changes.priority.map(|p| p.as_str())))
            .bind(("status", changes.status.map(|s| s.as_str())))
            .bind(("has_due_date", changes.due_date.is_some()))
            .bind(("due_date", changes.due_date.unwrap_or_default()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Vec<Task> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }

    /// Append a progress entry, optionally changing status in the same write
    pub async fn add_progress(
        &self,
        id: &str,
        entry: ProgressUpdate,
        status: Option<TaskStatus>,
    ) -> RepoResult<Task> {
        let thing = parse_record_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    progress_updates = array::append(progress_updates, $entry),
                    status = $status OR status,
                    updated_at = $now
                WHERE id = $thing
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("entry", entry))
            .bind(("status", status.map(|s| s.as_str())))
            .bind(("now", now_millis()))
            .await?;

        let updated: Vec<Task> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(TABLE, id)?;
        self.base.delete_record(thing, "Task").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::TaskPriority;

    async fn repo() -> TaskRepository {
        let db = DbService::memory().await.unwrap();
        TaskRepository::new(db.db)
    }

    fn new_task(title: &str, to: &str, priority: TaskPriority, due: i64) -> NewTask {
        NewTask {
            title: title.into(),
            description: String::new(),
            assigned_by: "admin".into(),
            assigned_to: RecordId::from_table_key("employee", to),
            priority,
            due_date: due,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let repo = repo().await;
        let task = repo
            .create(new_task("Report", "ann", TaskPriority::High, 1_000))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.progress_updates.is_empty());
        assert_eq!(task.assigned_to.to_string(), "employee:ann");
        assert!(task.involves("employee:ann"));
        assert!(task.involves("admin"));
        assert!(!task.involves("employee:bob"));
    }

    #[tokio::test]
    async fn test_find_sorted_and_filtered() {
        let repo = repo().await;
        repo.create(new_task("late", "ann", TaskPriority::High, 3_000))
            .await
            .unwrap();
        repo.create(new_task("soon-low", "ann", TaskPriority::Low, 1_000))
            .await
            .unwrap();
        repo.create(new_task("soon-high", "bob", TaskPriority::High, 1_000))
            .await
            .unwrap();

        let titles: Vec<String> = repo
            .find(None, None)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["soon-high", "soon-low", "late"]);

        let ann = repo
            .find(Some(RecordId::from_table_key("employee", "ann")), None)
            .await
            .unwrap();
        assert_eq!(ann.len(), 2);

        let completed = repo
            .find(None, Some(TaskStatus::Completed))
            .await
            .unwrap();
        assert!(completed.is_empty());
    }

    #[tokio::test]
    async fn test_update_partial() {
        let repo = repo().await;
        let task = repo
            .create(new_task("Report", "ann", TaskPriority::Medium, 1_000))
            .await
            .unwrap();
        let id = task.id.unwrap().to_string();

        let updated = repo
            .update(
                &id,
                TaskChanges {
                    status: Some(TaskStatus::InProgress),
                    due_date: Some(5_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.due_date, 5_000);
        assert_eq!(updated.title, "Report");
        assert_eq!(updated.priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn test_progress_appends_in_order() {
        let repo = repo().await;
        let task = repo
            .create(new_task("Report", "ann", TaskPriority::Medium, 1_000))
            .await
            .unwrap();
        let id = task.id.unwrap().to_string();

        repo.add_progress(
            &id,
            ProgressUpdate {
                message: "started".into(),
                timestamp: 1,
            },
            None,
        )
        .await
        .unwrap();
        let task = repo
            .add_progress(
                &id,
                ProgressUpdate {
                    message: "done".into(),
                    timestamp: 2,
                },
                Some(TaskStatus::Completed),
            )
            .await
            .unwrap();

        let messages: Vec<&str> = task
            .progress_updates
            .iter()
            .map(|p| p.message.as_str())
            .collect();
        assert_eq!(messages, vec!["started", "done"]);
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_missing_task() {
        let repo = repo().await;
        assert!(repo.find_by_id("nope").await.unwrap().is_none());
        assert!(matches!(
            repo.update("nope", TaskChanges::default()).await,
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete("task:nope").await,
            Err(RepoError::NotFound(_))
        ));
    }
}
