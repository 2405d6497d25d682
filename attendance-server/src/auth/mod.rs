//! Authentication and authorization
//!
//! - [`JwtService`] - token service
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] / [`require_admin`] - route guards
//! - [`password`] - Argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, require_admin, require_auth, require_permission};
