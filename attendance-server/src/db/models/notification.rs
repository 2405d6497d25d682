//! Notification Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub to_employee: RecordId,
    /// Sender id from the admin token
    pub from_admin: String,
    pub message: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub read: bool,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationCreate {
    pub to_employee_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationQuery {
    pub employee_id: Option<String>,
}
