//! Client-facing request/response types
//!
//! Auth DTOs exchanged between the web client and the server.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Employee login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Admin login request, checked against the configured credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Employee login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee: EmployeeInfo,
}

/// Admin login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Employee profile returned at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Identity carried by a token (`/api/auth/me`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_admin: bool,
}
