//! Permission Definitions
//!
//! Roles carry a fixed set of boolean flags. Each flag maps to one
//! permission string carried in the JWT; route guards check strings.

use serde::Serialize;

use crate::db::models::RolePermissions;

/// Super permission held by the configured administrator
pub const ALL: &str = "all";

pub const ATTENDANCE_CHECK_IN: &str = "attendance:check_in";
pub const EMPLOYEES_MANAGE: &str = "employees:manage";
pub const DEPARTMENTS_MANAGE: &str = "departments:manage";
pub const ROLES_MANAGE: &str = "roles:manage";
pub const TASKS_ASSIGN: &str = "tasks:assign";
pub const TASKS_VIEW_ALL: &str = "tasks:view_all";
pub const REPORTS_VIEW: &str = "reports:view";

/// Flag name -> permission string, in display order
pub const FLAG_PERMISSIONS: &[(&str, &str)] = &[
    ("can_check_in", ATTENDANCE_CHECK_IN),
    ("can_manage_employees", EMPLOYEES_MANAGE),
    ("can_manage_departments", DEPARTMENTS_MANAGE),
    ("can_manage_roles", ROLES_MANAGE),
    ("can_assign_tasks", TASKS_ASSIGN),
    ("can_view_all_tasks", TASKS_VIEW_ALL),
    ("can_view_reports", REPORTS_VIEW),
];

/// One entry of `GET /api/permissions`
#[derive(Debug, Clone, Serialize)]
pub struct PermissionInfo {
    pub flag: &'static str,
    pub permission: &'static str,
}

/// All configurable permissions
pub fn all_permissions() -> Vec<PermissionInfo> {
    FLAG_PERMISSIONS
        .iter()
        .map(|&(flag, permission)| PermissionInfo { flag, permission })
        .collect()
}

/// Permission strings granted by a role's flags
pub fn permissions_from_flags(flags: &RolePermissions) -> Vec<String> {
    let granted = [
        flags.can_check_in,
        flags.can_manage_employees,
        flags.can_manage_departments,
        flags.can_manage_roles,
        flags.can_assign_tasks,
        flags.can_view_all_tasks,
        flags.can_view_reports,
    ];

    FLAG_PERMISSIONS
        .iter()
        .zip(granted)
        .filter(|(_, on)| *on)
        .map(|((_, permission), _)| permission.to_string())
        .collect()
}

/// Fallback when an employee's role cannot be resolved
pub fn default_employee_permissions() -> Vec<String> {
    vec![ATTENDANCE_CHECK_IN.to_string()]
}

/// Validate if a permission string is known
pub fn is_valid_permission(permission: &str) -> bool {
    permission == ALL || FLAG_PERMISSIONS.iter().any(|(_, p)| *p == permission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_in_order() {
        let flags = RolePermissions {
            can_check_in: true,
            can_assign_tasks: true,
            can_view_reports: true,
            ..Default::default()
        };
        assert_eq!(
            permissions_from_flags(&flags),
            vec![ATTENDANCE_CHECK_IN, TASKS_ASSIGN, REPORTS_VIEW]
        );
    }

    #[test]
    fn test_no_flags_no_permissions() {
        assert!(permissions_from_flags(&RolePermissions::default()).is_empty());
    }

    #[test]
    fn test_all_permissions_lists_seven() {
        let all = all_permissions();
        assert_eq!(all.len(), 7);
        assert!(all.iter().all(|p| is_valid_permission(p.permission)));
        assert!(is_valid_permission(ALL));
        assert!(!is_valid_permission("orders:void"));
    }
}
