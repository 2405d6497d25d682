//! Shared types for the attendance service
//!
//! Error codes, the unified error/response types, and the DTOs that the
//! web client exchanges with the server.

pub mod client;
pub mod error;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
