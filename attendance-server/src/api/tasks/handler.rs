//! Task API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::lookup::{employee_record_id, find_employee};
use crate::auth::CurrentUser;
use crate::auth::permissions::{TASKS_ASSIGN, TASKS_VIEW_ALL};
use crate::core::ServerState;
use crate::db::models::{
    NewTask, ProgressCreate, ProgressUpdate, Task, TaskChanges, TaskCreate, TaskPriority,
    TaskQuery, TaskStatus, TaskUpdate,
};
use crate::db::repository::TaskRepository;
use crate::utils::time::parse_due_date;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_TITLE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, RepoResultExt};
use shared::util::now_millis;

fn parse_status(raw: &str) -> AppResult<TaskStatus> {
    raw.trim()
        .parse()
        .map_err(|msg: String| AppError::with_message(ErrorCode::TaskInvalidStatus, msg))
}

fn parse_priority(raw: &str) -> AppResult<TaskPriority> {
    raw.trim()
        .parse()
        .map_err(|msg: String| AppError::with_message(ErrorCode::TaskInvalidPriority, msg))
}

fn task_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::TaskNotFound, format!("Task {} not found", id))
}

async fn load_task(repo: &TaskRepository, id: &str) -> AppResult<Task> {
    repo.find_by_id(id).await?.ok_or_else(|| task_not_found(id))
}

/// Assignee, assignor, or anyone who can see or assign all tasks
fn can_access(user: &CurrentUser, task: &Task) -> bool {
    task.involves(&user.id)
        || user.has_permission(TASKS_VIEW_ALL)
        || user.has_permission(TASKS_ASSIGN)
}

fn access_denied() -> AppError {
    AppError::forbidden("You do not have access to this task")
}

/// List tasks, due date ascending then priority high to low
///
/// Without `tasks:view_all` the list is limited to the caller's own tasks.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_status)
        .transpose()?;

    let assigned_to = if user.has_permission(TASKS_VIEW_ALL) {
        query
            .assigned_to
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(employee_record_id)
            .transpose()?
    } else {
        Some(employee_record_id(&user.id)?)
    };

    let tasks = TaskRepository::new(state.get_db())
        .find(assigned_to, status)
        .await?;
    Ok(Json(tasks))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let task = load_task(&TaskRepository::new(state.get_db()), &id).await?;
    if !can_access(&user, &task) {
        return Err(access_denied());
    }
    Ok(Json(task))
}

/// Create a task; the caller becomes the assignor
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TaskCreate>,
) -> AppResult<(StatusCode, Json<Task>)> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if payload.assigned_to.trim().is_empty() {
        return Err(AppError::required("assigned_to"));
    }
    if payload.due_date.trim().is_empty() {
        return Err(AppError::required("due_date"));
    }

    let due_date = parse_due_date(&payload.due_date)?;
    let priority = match payload.priority.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(p) => parse_priority(p)?,
        None => TaskPriority::default(),
    };
    let assignee = find_employee(&state, &payload.assigned_to).await?;

    let task = TaskRepository::new(state.get_db())
        .create(NewTask {
            title: payload.title.trim().to_string(),
            description: payload.description.unwrap_or_default().trim().to_string(),
            assigned_by: user.id.clone(),
            assigned_to: employee_record_id(&assignee.id_string())?,
            priority,
            due_date,
        })
        .await?;

    tracing::info!(
        task_id = ?task.id,
        assigned_to = %task.assigned_to,
        assigned_by = %user.id,
        "Task created"
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// Partial update
///
/// Status alone may be changed by anyone with access to the task; any
/// other field needs `tasks:assign`.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<TaskUpdate>,
) -> AppResult<Json<Task>> {
    let repo = TaskRepository::new(state.get_db());
    let task = load_task(&repo, &id).await?;

    if !can_access(&user, &task) {
        return Err(access_denied());
    }
    if payload.touches_more_than_status() && !user.has_permission(TASKS_ASSIGN) {
        return Err(AppError::forbidden(format!(
            "Permission denied: {}",
            TASKS_ASSIGN
        )));
    }

    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let mut changes = TaskChanges {
        title: payload.title.map(|t| t.trim().to_string()),
        description: payload.description.map(|d| d.trim().to_string()),
        status: payload.status.as_deref().map(parse_status).transpose()?,
        priority: payload.priority.as_deref().map(parse_priority).transpose()?,
        due_date: payload.due_date.as_deref().map(parse_due_date).transpose()?,
        ..Default::default()
    };
    if let Some(assignee) = payload.assigned_to.as_deref() {
        let employee = find_employee(&state, assignee).await?;
        changes.assigned_to = Some(employee_record_id(&employee.id_string())?);
    }

    let task = repo
        .update(&id, changes)
        .await
        .or_codes(ErrorCode::TaskNotFound, ErrorCode::AlreadyExists)?;

    tracing::info!(task_id = %id, status = task.status.as_str(), "Task updated");
    Ok(Json(task))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    TaskRepository::new(state.get_db())
        .delete(&id)
        .await
        .or_codes(ErrorCode::TaskNotFound, ErrorCode::AlreadyExists)?;

    tracing::info!(task_id = %id, "Task deleted");
    Ok(Json(true))
}

/// Append a progress entry, optionally setting a new status
pub async fn add_progress(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProgressCreate>,
) -> AppResult<Json<Task>> {
    validate_required_text(&payload.message, "message", MAX_NOTE_LEN)?;
    let status = payload
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_status)
        .transpose()?;

    let repo = TaskRepository::new(state.get_db());
    let task = load_task(&repo, &id).await?;
    if !can_access(&user, &task) {
        return Err(access_denied());
    }

    let entry = ProgressUpdate {
        message: payload.message.trim().to_string(),
        timestamp: now_millis(),
    };
    let task = repo
        .add_progress(&id, entry, status)
        .await
        .or_codes(ErrorCode::TaskNotFound, ErrorCode::AlreadyExists)?;

    tracing::info!(
        task_id = %id,
        updates = task.progress_updates.len(),
        "Task progress added"
    );
    Ok(Json(task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::RecordId;

    fn user(id: &str, permissions: &[&str]) -> CurrentUser {
        CurrentUser {
            id: id.into(),
            name: "Test".into(),
            role: "Employee".into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            is_admin: false,
        }
    }

    fn task(assigned_to: &str, assigned_by: &str) -> Task {
        Task {
            id: Some(RecordId::from_table_key("task", "t1")),
            title: "Report".into(),
            description: String::new(),
            assigned_by: assigned_by.into(),
            assigned_to: RecordId::from_table_key("employee", assigned_to),
            priority: TaskPriority::Medium,
            status: TaskStatus::Pending,
            due_date: 0,
            progress_updates: vec![],
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_access_rules() {
        let t = task("ann", "employee:boss");
        assert!(can_access(&user("employee:ann", &[]), &t));
        assert!(can_access(&user("employee:boss", &[]), &t));
        assert!(!can_access(&user("employee:bob", &[]), &t));
        assert!(can_access(&user("employee:bob", &[TASKS_VIEW_ALL]), &t));
    }

    #[test]
    fn test_parse_errors_carry_task_codes() {
        assert_eq!(
            parse_status("done").unwrap_err().code,
            ErrorCode::TaskInvalidStatus
        );
        assert_eq!(
            parse_priority("urgent").unwrap_err().code,
            ErrorCode::TaskInvalidPriority
        );
        assert_eq!(parse_status(" completed ").unwrap(), TaskStatus::Completed);
    }
}
