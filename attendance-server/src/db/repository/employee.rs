//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::auth::password;
use crate::db::models::employee::{DEFAULT_DEPARTMENT, DEFAULT_POSITION, DEFAULT_ROLE};
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "employee";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

/// Canonical email form: trimmed, lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active employees, by department then name
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE is_active = true ORDER BY department, name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find all employees including inactive
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY department, name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id (`key` or `employee:key`)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing = parse_record_id(TABLE, id)?;
        self.find_by_record(thing).await
    }

    pub async fn find_by_record(&self, thing: RecordId) -> RepoResult<Option<Employee>> {
        let emp: Option<Employee> = self.base.db().select(thing).await?;
        Ok(emp)
    }

    /// Find employee by email (normalized before lookup)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", normalize_email(email)))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    ///
    /// Expects name, email and password to be present; applies the
    /// department / role / position defaults.
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let email = normalize_email(&data.email);

        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Employee with email '{}' already exists",
                email
            )));
        }

        let password_hash = password::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
        let now = now_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    name = $name,
                    email = $email,
                    password_hash = $password_hash,
                    department = $department,
                    role = $role,
                    position = $position,
                    is_active = true,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name.trim().to_string()))
            .bind(("email", email))
            .bind(("password_hash", password_hash))
            .bind(("department", or_default(data.department, DEFAULT_DEPARTMENT)))
            .bind(("role", or_default(data.role, DEFAULT_ROLE)))
            .bind(("position", or_default(data.position, DEFAULT_POSITION)))
            .bind(("now", now))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Partially update an employee
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let thing = parse_record_id(TABLE, id)?;
        let existing = self
            .find_by_record(thing.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        let email = data.email.as_deref().map(normalize_email);
        if let Some(ref new_email) = email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Employee with email '{}' already exists",
                new_email
            )));
        }

        let password_hash = match data.password.as_deref() {
            Some(p) if !p.is_empty() => Some(
                password::hash_password(p)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            ),
            _ => None,
        };

        let trimmed = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    email = $email OR email,
                    password_hash = $password_hash OR password_hash,
                    department = $department OR department,
                    role = $role OR role,
                    position = $position OR position,
                    is_active = IF $has_is_active THEN $is_active ELSE is_active END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", trimmed(data.name)))
            .bind(("email", email))
            .bind(("password_hash", password_hash))
            .bind(("department", trimmed(data.department)))
            .bind(("role", trimmed(data.role)))
            .bind(("position", trimmed(data.position)))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Hard delete an employee
    ///
    /// Attendance, tasks and lunch times that reference the employee stay.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(TABLE, id)?;
        self.base.delete_record(thing, "Employee").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> EmployeeRepository {
        let db = DbService::memory().await.unwrap();
        EmployeeRepository::new(db.db)
    }

    fn payload(name: &str, email: &str) -> EmployeeCreate {
        EmployeeCreate {
            name: name.into(),
            email: email.into(),
            password: "password123".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults_and_normalizes_email() {
        let repo = repo().await;
        let emp = repo
            .create(payload("  Ann  ", " Ann@Example.COM "))
            .await
            .unwrap();

        assert_eq!(emp.name, "Ann");
        assert_eq!(emp.email, "ann@example.com");
        assert_eq!(emp.department, "General");
        assert_eq!(emp.role, "Employee");
        assert_eq!(emp.position, "Employee");
        assert!(emp.is_active);
        assert!(password::verify_password("password123", &emp.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = repo().await;
        repo.create(payload("Ann", "ann@example.com")).await.unwrap();
        let err = repo
            .create(payload("Other Ann", "ANN@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_and_deactivate() {
        let repo = repo().await;
        let emp = repo.create(payload("Ann", "ann@example.com")).await.unwrap();
        let id = emp.id_string();

        let updated = repo
            .update(
                &id,
                EmployeeUpdate {
                    position: Some("Lead".into()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.position, "Lead");
        assert_eq!(updated.name, "Ann");
        assert!(!updated.is_active);

        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(repo.find_all_with_inactive().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let repo = repo().await;
        repo.create(payload("Ann", "ann@example.com")).await.unwrap();
        let bob = repo.create(payload("Bob", "bob@example.com")).await.unwrap();

        let err = repo
            .update(
                &bob.id_string(),
                EmployeeUpdate {
                    email: Some("ann@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_list_sorted_by_department_then_name() {
        let repo = repo().await;
        for (name, email, dept) in [
            ("Zed", "zed@example.com", "Finance"),
            ("Amy", "amy@example.com", "Technology"),
            ("Bea", "bea@example.com", "Finance"),
        ] {
            let mut p = payload(name, email);
            p.department = Some(dept.into());
            repo.create(p).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Bea", "Zed", "Amy"]);
    }

    #[tokio::test]
    async fn test_delete_by_bare_key() {
        let repo = repo().await;
        let emp = repo.create(payload("Ann", "ann@example.com")).await.unwrap();
        let key = emp.id.as_ref().unwrap().key().to_string();

        repo.delete(&key).await.unwrap();
        assert!(repo.find_by_id(&emp.id_string()).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&key).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
