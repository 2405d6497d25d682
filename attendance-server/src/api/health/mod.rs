//! Health check routes
//!
//! # Routes
//!
//! | Path | Method | Meaning | Auth |
//! |------|--------|---------|------|
//! | /health | GET | liveness | none |
//! | /health/detailed | GET | uptime and database check | none |
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0" }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::DbService;

/// Health router - public
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    /// Seconds since start
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    /// ok | error
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let db_start = std::time::Instant::now();
    let db_check = match DbService::ping(&state.db).await {
        Ok(()) => CheckResult::ok_with_latency(db_start.elapsed().as_millis() as u64),
        Err(e) => CheckResult::error(e.to_string()),
    };

    let all_ok = db_check.status == "ok";

    Json(DetailedHealthResponse {
        status: if all_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        checks: HealthChecks { database: db_check },
    })
}
