//! Role Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Role, RoleCreate, RoleUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "role";

#[derive(Clone)]
pub struct RoleRepository {
    base: BaseRepository,
}

impl RoleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All roles by department then name
    pub async fn find_all(&self) -> RepoResult<Vec<Role>> {
        let roles: Vec<Role> = self
            .base
            .db()
            .query("SELECT * FROM role ORDER BY department, name")
            .await?
            .take(0)?;
        Ok(roles)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Role>> {
        let thing = parse_record_id(TABLE, id)?;
        let role: Option<Role> = self.base.db().select(thing).await?;
        Ok(role)
    }

    pub async fn find_by_name_and_department(
        &self,
        name: &str,
        department: &str,
    ) -> RepoResult<Option<Role>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM role WHERE name = $name AND department = $department LIMIT 1")
            .bind(("name", name.trim().to_string()))
            .bind(("department", department.trim().to_string()))
            .await?;
        let roles: Vec<Role> = result.take(0)?;
        Ok(roles.into_iter().next())
    }

    /// First role with this name in any department
    ///
    /// Used to resolve an employee's permissions when the role is not
    /// defined for the employee's own department.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM role WHERE name = $name ORDER BY department")
            .bind(("name", name.trim().to_string()))
            .await?;
        let roles: Vec<Role> = result.take(0)?;
        Ok(roles.into_iter().next())
    }

    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM role GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    /// Create a role; missing permissions default to check-in only
    pub async fn create(&self, data: RoleCreate) -> RepoResult<Role> {
        let name = data.name.trim().to_string();
        let department = data.department.trim().to_string();

        if self
            .find_by_name_and_department(&name, &department)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Role '{}' already exists in department '{}'",
                name, department
            )));
        }

        let permissions = data.permissions.unwrap_or_default();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE role SET
                    name = $name,
                    department = $department,
                    permissions = $permissions,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", name))
            .bind(("department", department))
            .bind(("permissions", permissions))
            .bind(("now", now_millis()))
            .await?;

        let created: Option<Role> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create role".to_string()))
    }

    /// Partial update; `permissions`, when present, replaces the full set
    pub async fn update(&self, id: &str, data: RoleUpdate) -> RepoResult<Role> {
        let thing = parse_record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Role {} not found", id)))?;

        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let name = clean(data.name);
        let department = clean(data.department);

        let target_name = name.as_deref().unwrap_or(&existing.name);
        let target_department = department.as_deref().unwrap_or(&existing.department);
        if (target_name != existing.name || target_department != existing.department)
            && self
                .find_by_name_and_department(target_name, target_department)
                .await?
                .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Role '{}' already exists in department '{}'",
                target_name, target_department
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    department = $department OR department,
                    permissions = IF $has_permissions THEN $permissions ELSE permissions END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("department", department))
            .bind(("has_permissions", data.permissions.is_some()))
            .bind(("permissions", data.permissions.unwrap_or(existing.permissions)))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Role>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Role {} not found", id)))
    }

    /// Hard delete; employees keep their role name
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(TABLE, id)?;
        self.base.delete_record(thing, "Role").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::RolePermissions;

    async fn repo() -> RoleRepository {
        let db = DbService::memory().await.unwrap();
        RoleRepository::new(db.db)
    }

    fn payload(name: &str, department: &str) -> RoleCreate {
        RoleCreate {
            name: name.into(),
            department: department.into(),
            permissions: None,
        }
    }

    #[tokio::test]
    async fn test_create_without_permissions_has_no_flags() {
        let repo = repo().await;
        let role = repo.create(payload("Analyst", "Finance")).await.unwrap();
        assert_eq!(role.permissions, RolePermissions::default());
        assert!(!role.permissions.can_check_in);
    }

    #[tokio::test]
    async fn test_same_name_allowed_in_other_department() {
        let repo = repo().await;
        repo.create(payload("Lead", "Finance")).await.unwrap();
        repo.create(payload("Lead", "Technology")).await.unwrap();
        assert!(matches!(
            repo.create(payload("Lead", "Finance")).await,
            Err(RepoError::Duplicate(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_permissions() {
        let repo = repo().await;
        let role = repo
            .create(RoleCreate {
                name: "Lead".into(),
                department: "Finance".into(),
                permissions: Some(RolePermissions::all()),
            })
            .await
            .unwrap();

        let flags = RolePermissions {
            can_assign_tasks: true,
            ..Default::default()
        };
        let updated = repo
            .update(
                &role.id.unwrap().to_string(),
                RoleUpdate {
                    permissions: Some(flags),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.permissions, flags);
        assert_eq!(updated.name, "Lead");
    }

    #[tokio::test]
    async fn test_find_by_name_and_department() {
        let repo = repo().await;
        repo.create(payload("Lead", "Finance")).await.unwrap();
        assert!(
            repo.find_by_name_and_department("Lead", "Finance")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.find_by_name_and_department("Lead", "Marketing")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(
            repo.find_by_name("Lead").await.unwrap().unwrap().department,
            "Finance"
        );
    }
}
