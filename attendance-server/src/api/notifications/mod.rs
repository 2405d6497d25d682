//! Notification API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/notifications", routes())
}

fn routes() -> Router<ServerState> {
    let employee_routes = Router::new()
        .route("/", get(handler::unread))
        .route("/{id}/read", put(handler::mark_read));

    // Only the admin sends notifications
    let admin_routes = Router::new()
        .route("/", post(handler::send))
        .layer(middleware::from_fn(require_admin));

    employee_routes.merge(admin_routes)
}
