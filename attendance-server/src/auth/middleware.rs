//! Authentication middleware
//!
//! Axum middleware for JWT authentication and authorization

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use shared::error::ErrorCode;

/// Routes under `/api/` that skip authentication
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/admin/login"];

/// Authentication middleware - requires a valid token
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>` and
/// inserts [`CurrentUser`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non `/api/` paths (health, unknown routes return 404 normally)
/// - the two login routes
///
/// # Errors
///
/// | Case | Status |
/// |------|--------|
/// | no Authorization header | 401 |
/// | expired token | 401 TokenExpired |
/// | invalid token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Validate the bearer token in `headers`
pub(crate) fn authenticate(
    state: &ServerState,
    headers: &http::HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", uri));
            return Err(AppError::not_authenticated());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", uri)
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Permission middleware - requires a specific permission
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/departments", post(handler::create))
///     .layer(middleware::from_fn(require_permission("departments:manage")));
/// ```
///
/// Missing permission returns 403.
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req.current_user()?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Admin middleware - requires the admin token
///
/// Non-admins get 403.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.current_user()?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            user_role = user.role.clone()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

/// Extension method to read [`CurrentUser`] from a request
pub trait CurrentUserExt {
    /// Returns 401 when the request is not authenticated
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or_else(AppError::not_authenticated)
    }
}
