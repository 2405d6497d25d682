//! Role Model
//!
//! A role is scoped to a department and carries a fixed set of
//! permission flags.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Role permission flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePermissions {
    pub can_check_in: bool,
    pub can_manage_employees: bool,
    pub can_manage_departments: bool,
    pub can_manage_roles: bool,
    pub can_assign_tasks: bool,
    pub can_view_all_tasks: bool,
    pub can_view_reports: bool,
}

impl RolePermissions {
    pub const fn all() -> Self {
        Self {
            can_check_in: true,
            can_manage_employees: true,
            can_manage_departments: true,
            can_manage_roles: true,
            can_assign_tasks: true,
            can_view_all_tasks: true,
            can_view_reports: true,
        }
    }

    pub const fn check_in_only() -> Self {
        Self {
            can_check_in: true,
            can_manage_employees: false,
            can_manage_departments: false,
            can_manage_roles: false,
            can_assign_tasks: false,
            can_view_all_tasks: false,
            can_view_reports: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub permissions: RolePermissions,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleCreate {
    pub name: String,
    pub department: String,
    pub permissions: Option<RolePermissions>,
}

/// Partial update; `permissions` replaces the whole flag set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<RolePermissions>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_default_false() {
        let flags: RolePermissions = serde_json::from_str(r#"{"can_check_in":true}"#).unwrap();
        assert_eq!(flags, RolePermissions::check_in_only());
    }
}
