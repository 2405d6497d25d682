//! Employee API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::permissions::EMPLOYEES_MANAGE;
use crate::auth::require_permission;
use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    // Any authenticated caller may read the directory
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/all", get(handler::list_with_inactive))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(EMPLOYEES_MANAGE)));

    read_routes.merge(manage_routes)
}
