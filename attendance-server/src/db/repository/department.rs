//! Department Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Department, DepartmentCreate, DepartmentUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "department";

#[derive(Clone)]
pub struct DepartmentRepository {
    base: BaseRepository,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All departments by name
    pub async fn find_all(&self) -> RepoResult<Vec<Department>> {
        let departments: Vec<Department> = self
            .base
            .db()
            .query("SELECT * FROM department ORDER BY name")
            .await?
            .take(0)?;
        Ok(departments)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Department>> {
        let thing = parse_record_id(TABLE, id)?;
        let dept: Option<Department> = self.base.db().select(thing).await?;
        Ok(dept)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Department>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM department WHERE name = $name LIMIT 1")
            .bind(("name", name.trim().to_string()))
            .await?;
        let departments: Vec<Department> = result.take(0)?;
        Ok(departments.into_iter().next())
    }

    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM department GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    pub async fn create(&self, data: DepartmentCreate) -> RepoResult<Department> {
        let name = data.name.trim().to_string();
        if self.find_by_name(&name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Department '{}' already exists",
                name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE department SET
                    name = $name,
                    description = $description,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", name))
            .bind(("description", data.description))
            .bind(("now", now_millis()))
            .await?;

        let created: Option<Department> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create department".to_string()))
    }

    pub async fn update(&self, id: &str, data: DepartmentUpdate) -> RepoResult<Department> {
        let thing = parse_record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {} not found", id)))?;

        let name = data
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(ref new_name) = name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Department '{}' already exists",
                new_name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    description = IF $has_description THEN $description ELSE description END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("has_description", data.description.is_some()))
            .bind(("description", data.description))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Department>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Department {} not found", id)))
    }

    /// Hard delete; employees keep their department name
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(TABLE, id)?;
        self.base.delete_record(thing, "Department").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> DepartmentRepository {
        let db = DbService::memory().await.unwrap();
        DepartmentRepository::new(db.db)
    }

    fn payload(name: &str) -> DepartmentCreate {
        DepartmentCreate {
            name: name.into(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_sorted() {
        let repo = repo().await;
        repo.create(payload("Sales")).await.unwrap();
        repo.create(DepartmentCreate {
            name: " Design ".into(),
            description: Some("Product design".into()),
        })
        .await
        .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Design");
        assert_eq!(all[0].description.as_deref(), Some("Product design"));
        assert_eq!(all[1].name, "Sales");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let repo = repo().await;
        repo.create(payload("Sales")).await.unwrap();
        assert!(matches!(
            repo.create(payload("Sales")).await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let repo = repo().await;
        let dept = repo
            .create(DepartmentCreate {
                name: "Sales".into(),
                description: Some("Old".into()),
            })
            .await
            .unwrap();
        let id = dept.id.unwrap().to_string();

        let renamed = repo
            .update(
                &id,
                DepartmentUpdate {
                    name: Some("Revenue".into()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Revenue");
        assert_eq!(renamed.description.as_deref(), Some("Old"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = repo().await;
        assert!(matches!(
            repo.delete("department:nope").await,
            Err(RepoError::NotFound(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
