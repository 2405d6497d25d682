//! Lunch Time Model
//!
//! One lunch schedule per employee.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Weekday names accepted in `days`
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LunchTime {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    /// Copied from the employee at write time
    pub employee_name: String,
    /// `H:MM` or `HH:MM`, 24h
    pub start_time: String,
    pub end_time: String,
    pub days: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LunchTimeCreate {
    pub employee_id: String,
    pub start_time: String,
    pub end_time: String,
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LunchTimeUpdate {
    pub employee_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub days: Option<Vec<String>>,
}

/// Validated lunch time fields ready for the repository
#[derive(Debug, Clone)]
pub struct LunchTimeFields {
    pub employee: RecordId,
    pub employee_name: String,
    pub start_time: String,
    pub end_time: String,
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LunchTimeQuery {
    pub employee_id: Option<String>,
}
