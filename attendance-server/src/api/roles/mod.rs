//! Role API Module
//!
//! Also serves the permission catalogue at `/api/permissions`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::permissions::ROLES_MANAGE;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/permissions", get(handler::permissions))
        .nest("/api/roles", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(ROLES_MANAGE)));

    read_routes.merge(manage_routes)
}
