//! Admin Routes
//!
//! | Path | Method | Guard |
//! |------|--------|-------|
//! | /api/admin/login | POST | public |
//! | /api/admin/attendance | GET | own records, or reports:view |
//! | /api/admin/attendance/export | GET | reports:view |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::permissions::REPORTS_VIEW;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    let open_routes = Router::new()
        .route("/login", post(handler::login))
        .route("/attendance", get(handler::attendance_page));

    let report_routes = Router::new()
        .route("/attendance/export", get(handler::export_attendance))
        .layer(middleware::from_fn(require_permission(REPORTS_VIEW)));

    open_routes.merge(report_routes)
}
