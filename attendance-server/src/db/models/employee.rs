//! Employee Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Employee ID type
pub type EmployeeId = RecordId;

pub const DEFAULT_DEPARTMENT: &str = "General";
pub const DEFAULT_ROLE: &str = "Employee";
pub const DEFAULT_POSITION: &str = "Employee";

/// Employee model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    pub department: String,
    pub role: String,
    pub position: String,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl Employee {
    /// `employee:xyz`, empty when not yet persisted
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// Create employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
