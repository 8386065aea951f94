// src/models/user.rs
// DOCUMENTATION: User account data structures
// PURPOSE: Database model plus auth and admin DTOs for user management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a user account record from the database
/// DOCUMENTATION: Maps directly to the users table
/// The password hash never leaves the service layer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login email (unique, lowercased)
    pub email: String,

    /// Argon2 password hash - excluded from every serialized response
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Contact phone number
    pub phone: Option<String>,

    /// Role: user, editor, admin
    pub role: String,

    /// Preferred UI locale: en or ar
    pub preferred_locale: String,

    /// Soft delete flag (false = deactivated account)
    pub is_active: bool,

    /// Last successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /auth/register
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct RegisterRequest {
    /// Display name (required)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Login email (required, unique)
    #[validate(email)]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Preferred locale, defaults to "en"
    #[serde(default)]
    pub preferred_locale: Option<String>,
}

/// Request DTO for POST /auth/login
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request DTO for PUT /users/{id} (admin)
/// All fields are optional - only provided fields are updated
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub preferred_locale: Option<String>,
    pub is_active: Option<bool>,
}

/// Response DTO for user data
/// DOCUMENTATION: Public view of a user account, never carries the hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub preferred_locale: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Response DTO for successful register/login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed bearer token
    pub token: String,
    /// Authenticated account
    pub user: UserResponse,
}

/// Query parameters for GET /users
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Name/email substring filter
    pub q: Option<String>,

    /// Filter by role
    pub role: Option<String>,

    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Paginated user list
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub data: Vec<UserResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

impl User {
    /// Convert User to UserResponse for API
    /// DOCUMENTATION: Maps database model to API response DTO
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role.clone(),
            preferred_locale: self.preferred_locale.clone(),
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}
