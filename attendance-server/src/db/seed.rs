//! Default departments and roles
//!
//! Each table is seeded only while it is empty, so restarts and
//! user edits are left alone.

use super::models::{DepartmentCreate, RoleCreate, RolePermissions};
use super::repository::{DepartmentRepository, RepoResult, RoleRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const DEPARTMENTS: [(&str, &str); 7] = [
    ("Administration", "Administrative department"),
    ("Technology", "IT and Technology department"),
    ("Human Resources", "HR department"),
    ("Marketing", "Digital Marketing department"),
    ("Finance", "Finance and Accounting department"),
    ("Operations", "Operations department"),
    ("General", "General department"),
];

fn default_roles() -> [(&'static str, &'static str, RolePermissions); 6] {
    [
        ("Admin", "Administration", RolePermissions::all()),
        (
            "CTO",
            "Technology",
            RolePermissions {
                can_check_in: true,
                can_manage_employees: true,
                can_assign_tasks: true,
                can_view_all_tasks: true,
                can_view_reports: true,
                ..Default::default()
            },
        ),
        (
            "HR Manager",
            "Human Resources",
            RolePermissions {
                can_check_in: true,
                can_manage_employees: true,
                can_assign_tasks: true,
                can_view_reports: true,
                ..Default::default()
            },
        ),
        (
            "Manager",
            "General",
            RolePermissions {
                can_check_in: true,
                can_assign_tasks: true,
                ..Default::default()
            },
        ),
        ("Employee", "General", RolePermissions::check_in_only()),
        ("Intern", "General", RolePermissions::check_in_only()),
    ]
}

pub(super) async fn seed_defaults(db: &Surreal<Db>) -> RepoResult<()> {
    let departments = DepartmentRepository::new(db.clone());
    if departments.count().await? == 0 {
        for (name, description) in DEPARTMENTS {
            departments
                .create(DepartmentCreate {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                })
                .await?;
        }
        tracing::info!(count = DEPARTMENTS.len(), "Seeded default departments");
    }

    let roles = RoleRepository::new(db.clone());
    if roles.count().await? == 0 {
        let defaults = default_roles();
        for (name, department, permissions) in defaults {
            roles
                .create(RoleCreate {
                    name: name.to_string(),
                    department: department.to_string(),
                    permissions: Some(permissions),
                })
                .await?;
        }
        tracing::info!(count = defaults.len(), "Seeded default roles");
    }

    Ok(())
}
