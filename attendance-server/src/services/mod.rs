//! Services
//!
//! - [`HttpService`] - router assembly, middleware stack and listener

pub mod http;

pub use http::{HttpService, build_app};
