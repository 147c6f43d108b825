//! Authentication and user management DTOs

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use validator::Validate;

use super::Role;

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Principal response (sanitized for API)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PrincipalResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub activated: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to create a principal
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    pub role: Role,
    #[serde(default = "default_activated")]
    pub activated: bool,
}

fn default_activated() -> bool {
    true
}

/// Request to toggle a principal's activation flag
#[derive(Debug, Deserialize)]
pub struct ActivationRequest {
    pub activated: bool,
}
