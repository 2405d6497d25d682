use crate::auth::require_auth;
use crate::core::ServerState;
use crate::utils::AppError;
use axum::body::Body;
use axum::http::StatusCode;
use axum::{Router, middleware};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tower::ServiceExt;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// HTTP access log
///
/// One line per request with method, path, status, latency and request id.
async fn log_request(request: http::Request<Body>, next: middleware::Next) -> http::Response<Body> {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(
            target: "http_access",
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "request failed"
        );
    } else {
        tracing::info!(
            target: "http_access",
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "request"
        );
    }

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::admin::router())
        .merge(crate::api::employees::router())
        .merge(crate::api::departments::router())
        .merge(crate::api::roles::router())
        .merge(crate::api::tasks::router())
        .merge(crate::api::attendance::router())
        .merge(crate::api::lunch_times::router())
        .merge(crate::api::notifications::router())
}

#[derive(Clone)]
pub struct HttpService {
    state: ServerState,
    router: Router,
}

impl HttpService {
    /// Assemble the full application with its middleware stack
    pub fn new(state: ServerState) -> Self {
        let timeout = Duration::from_millis(state.config.request_timeout_ms);

        let router = build_app()
            // require_auth skips public routes itself
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state.clone())
            .layer(middleware::from_fn(log_request))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            ))
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Self { state, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Dispatch one request in-process
    pub async fn oneshot(&self, request: http::Request<Body>) -> http::Response<Body> {
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    /// Listen on `0.0.0.0:HTTP_PORT` until `shutdown_signal` resolves
    pub async fn start_server<F>(&self, shutdown_signal: F) -> Result<(), AppError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        tracing::info!("Starting HTTP server on {}", addr);

        let handle = axum_server::Handle::new();
        let grace = Duration::from_millis(self.state.config.shutdown_timeout_ms);

        let handle_clone = handle.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            handle_clone.graceful_shutdown(Some(grace));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(self.router().into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
