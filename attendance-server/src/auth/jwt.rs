//! JWT token service
//!
//! Issues, validates and decodes access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::permissions::ALL;

/// Minimum accepted secret length
pub const MIN_SECRET_LEN: usize = 32;

/// Subject and role of the configured administrator
pub const ADMIN_ID: &str = "admin";

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 characters)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER`, `JWT_AUDIENCE`
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            secret: load_jwt_secret()?,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 24 hours
            issuer: std::env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "attendance-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "attendance-clients".to_string()),
        })
    }

    /// Fixed configuration with a random secret, for tests
    pub fn for_tests() -> Self {
        Self {
            secret: generate_secure_printable_jwt_secret(),
            expiration_minutes: 60,
            issuer: "attendance-server".to_string(),
            audience: "attendance-clients".to_string(),
        }
    }
}

/// JWT claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (`employee:xyz` or `admin`)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Role name
    pub role: String,
    /// Comma separated permissions
    pub permissions: String,
    /// Set for tokens issued by the admin login
    #[serde(default)]
    pub is_admin: bool,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable random secret (development only)
pub fn generate_secure_printable_jwt_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        // RNG failure: time-derived key, still >= 32 chars
        return format!("attendance-dev-key-{:032}", Utc::now().timestamp_nanos_opt().unwrap_or(0));
    }

    bytes
        .iter()
        .map(|b| ALLOWED[(*b as usize) % ALLOWED.len()] as char)
        .collect()
}

/// Load the JWT secret from the environment
///
/// Debug builds generate a temporary key when unset; release builds refuse.
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < MIN_SECRET_LEN {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_SECRET_LEN
                )));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set! Generating temporary key for development.");
                Ok(generate_secure_printable_jwt_secret())
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("expiration_minutes", &self.config.expiration_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for an employee
    pub fn generate_token(
        &self,
        user_id: &str,
        name: &str,
        role: &str,
        permissions: &[String],
    ) -> Result<String, JwtError> {
        self.encode_claims(user_id, name, role, permissions.join(","), false)
    }

    /// Issue a token for the configured administrator (`all` permission)
    pub fn generate_admin_token(&self, username: &str) -> Result<String, JwtError> {
        self.encode_claims(ADMIN_ID, username, ADMIN_ID, ALL.to_string(), true)
    }

    fn encode_claims(
        &self,
        user_id: &str,
        name: &str,
        role: &str,
        permissions: String,
        is_admin: bool,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            permissions,
            is_admin,
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Current user context, decoded from the JWT claims
///
/// Inserted into request extensions by [`super::require_auth`].
///
/// ```ignore
/// async fn handler(user: CurrentUser) -> Json<()> {
///     if user.has_permission("tasks:assign") {
///         // ...
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// `employee:xyz`, or `admin` for the configured administrator
    pub id: String,
    pub name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_admin: bool,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        let permissions = claims
            .permissions
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
            permissions,
            is_admin: claims.is_admin,
        }
    }
}

impl CurrentUser {
    /// Administrators hold every permission
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Check a single permission
    ///
    /// 1. administrators pass
    /// 2. the `all` permission passes
    /// 3. otherwise exact match
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.is_admin() {
            return true;
        }
        self.permissions.iter().any(|p| p == ALL || p == permission)
    }

    /// Whether `employee_id` refers to this user
    pub fn is_self(&self, employee_id: &str) -> bool {
        self.id == employee_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::for_tests())
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let permissions = vec![
            "attendance:check_in".to_string(),
            "tasks:assign".to_string(),
        ];

        let token = service
            .generate_token("employee:ann", "Ann", "Manager", &permissions)
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "employee:ann");
        assert_eq!(claims.name, "Ann");
        assert_eq!(claims.role, "Manager");
        assert_eq!(claims.permissions, "attendance:check_in,tasks:assign");
        assert!(!claims.is_admin);
    }

    #[test]
    fn test_admin_token_carries_all() {
        let service = service();
        let token = service.generate_admin_token("boss").unwrap();
        let user = CurrentUser::from(service.validate_token(&token).unwrap());

        assert_eq!(user.id, "admin");
        assert!(user.is_admin());
        assert_eq!(user.permissions, vec!["all".to_string()]);
        assert!(user.has_permission("reports:view"));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = service()
            .generate_token("employee:ann", "Ann", "Employee", &[])
            .unwrap();
        let err = service().validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = JwtConfig::for_tests();
        config.expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let token = service
            .generate_token("employee:ann", "Ann", "Employee", &[])
            .unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_current_user_permissions() {
        let user = CurrentUser {
            id: "employee:1".to_string(),
            name: "John".to_string(),
            role: "Employee".to_string(),
            permissions: vec!["attendance:check_in".to_string()],
            is_admin: false,
        };

        assert!(user.has_permission("attendance:check_in"));
        assert!(!user.has_permission("employees:manage"));
        assert!(user.is_self("employee:1"));
    }

    #[test]
    fn test_empty_permissions_claim() {
        let service = service();
        let token = service
            .generate_token("employee:x", "X", "Intern", &[])
            .unwrap();
        let user = CurrentUser::from(service.validate_token(&token).unwrap());
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
    }

    #[test]
    fn test_printable_secret_length() {
        let secret = generate_secure_printable_jwt_secret();
        assert!(secret.len() >= MIN_SECRET_LEN);
        assert_ne!(secret, generate_secure_printable_jwt_secret());
    }
}
