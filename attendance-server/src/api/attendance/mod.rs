//! Attendance API Module

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::auth::permissions::ATTENDANCE_CHECK_IN;
use crate::auth::require_permission;
use crate::core::ServerState;

/// Check-in payloads may carry a webcam capture
pub const ATTENDANCE_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::recent));

    let record_routes = Router::new()
        .route("/", post(handler::record))
        .layer(DefaultBodyLimit::max(ATTENDANCE_BODY_LIMIT))
        .layer(middleware::from_fn(require_permission(ATTENDANCE_CHECK_IN)));

    read_routes.merge(record_routes)
}
