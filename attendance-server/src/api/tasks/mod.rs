//! Task API Module
//!
//! Reading, status updates and progress are checked per task in the
//! handlers; creating and deleting need `tasks:assign`.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::permissions::TASKS_ASSIGN;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tasks", routes())
}

fn routes() -> Router<ServerState> {
    let task_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/progress", post(handler::add_progress));

    let assign_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_permission(TASKS_ASSIGN)));

    task_routes.merge(assign_routes)
}
