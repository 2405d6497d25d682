//! JWT Extractor
//!
//! Lets handlers take `CurrentUser` as an argument

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate;
use crate::core::ServerState;

/// Reuses the user set by [`super::require_auth`], or validates the token
/// itself when the middleware did not run.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(state, &parts.headers, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
