//! Task Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Task status
///
/// Transitions are unconstrained: any value may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!(
                "Invalid status '{}'. Must be one of: pending, in-progress, completed, cancelled",
                other
            )),
        }
    }
}

/// Task priority, ordered Low < Medium < High
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "Invalid priority '{}'. Must be one of: low, medium, high",
                other
            )),
        }
    }
}

/// One entry of a task's progress log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub message: String,
    /// Unix millis
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Employee id of the assignor, or `admin`
    pub assigned_by: String,
    #[serde(with = "serde_helpers::record_id")]
    pub assigned_to: RecordId,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    /// Unix millis
    pub due_date: i64,
    #[serde(default)]
    pub progress_updates: Vec<ProgressUpdate>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Task {
    /// Whether `user_id` is the assignee or the assignor
    pub fn involves(&self, user_id: &str) -> bool {
        self.assigned_to.to_string() == user_id || self.assigned_by == user_id
    }
}

/// Create task payload (strings are parsed and validated by the handler)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskCreate {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: String,
    pub priority: Option<String>,
    pub due_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

impl TaskUpdate {
    /// Whether anything besides `status` is being changed
    pub fn touches_more_than_status(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.assigned_to.is_some()
            || self.priority.is_some()
            || self.due_date.is_some()
    }
}

/// Validated task fields ready for the repository
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assigned_by: String,
    pub assigned_to: RecordId,
    pub priority: TaskPriority,
    pub due_date: i64,
}

/// Validated partial update
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<RecordId>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressCreate {
    pub message: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskQuery {
    pub assigned_to: Option<String>,
    pub status: Option<String>,
}
