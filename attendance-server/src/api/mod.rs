//! API routes
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`auth`] - employee login, current user
//! - [`admin`] - admin login and attendance reports
//! - [`employees`] - employee management
//! - [`departments`] - department management
//! - [`roles`] - roles and the permission catalogue
//! - [`tasks`] - task assignment and progress
//! - [`attendance`] - check-in / check-out
//! - [`lunch_times`] - lunch schedules
//! - [`notifications`] - admin to employee messages

mod lookup;

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod lunch_times;
pub mod notifications;
pub mod roles;
pub mod tasks;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
