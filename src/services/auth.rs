// src/services/auth.rs
// DOCUMENTATION: Authentication and authorization
// PURPOSE: Password hashing, bearer tokens and the role ladder

use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::TravelError;
use crate::models::{LoginRequest, RegisterRequest, User};
use actix_web::HttpRequest;
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Role ladder: every rung holds the powers of the rungs below it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    User,
    Editor,
    Admin,
}

impl UserRole {
    pub fn from_str(role: &str) -> Self {
        match role {
            "admin" => UserRole::Admin,
            "editor" => UserRole::Editor,
            _ => UserRole::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Editor => "editor",
            UserRole::Admin => "admin",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            UserRole::User => 0,
            UserRole::Editor => 1,
            UserRole::Admin => 2,
        }
    }

    /// Editors and admins count as staff
    pub fn is_staff(&self) -> bool {
        self.rank() >= UserRole::Editor.rank()
    }
}

/// Bearer token payload
/// DOCUMENTATION: sub carries the user id, role the ladder rung at
/// issue time
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// The authenticated caller of a request
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    /// Require editor or admin
    pub fn require_staff(&self) -> Result<(), TravelError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            log::warn!("Staff endpoint refused for user {}", self.id);
            Err(TravelError::Forbidden)
        }
    }

    /// Require admin
    pub fn require_admin(&self) -> Result<(), TravelError> {
        if self.role == UserRole::Admin {
            Ok(())
        } else {
            log::warn!("Admin endpoint refused for user {}", self.id);
            Err(TravelError::Forbidden)
        }
    }

    /// A caller may touch their own records, staff may touch anyone's
    pub fn can_access_user(&self, target: Uuid) -> Result<(), TravelError> {
        if self.id == target || self.role.is_staff() {
            Ok(())
        } else {
            Err(TravelError::Forbidden)
        }
    }
}

/// AuthService: account and token operations
/// DOCUMENTATION: Handlers authenticate by calling
/// AuthService::authenticate(&req, &config) at the top of the function
pub struct AuthService;

impl AuthService {
    /// Hash a plaintext password with Argon2 and a fresh salt
    pub fn hash_password(password: &str) -> Result<String, TravelError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                log::error!("Password hashing failed: {}", e);
                TravelError::InternalError("Could not process password".to_string())
            })?;

        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, TravelError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            log::error!("Stored password hash unreadable: {}", e);
            TravelError::InternalError("Credential verification failed".to_string())
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Sign a bearer token for a user
    pub fn issue_token(user: &User, config: &Config) -> Result<String, TravelError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            exp: (now + Duration::hours(config.jwt_expiry_hours as i64)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("Token signing failed: {}", e);
            TravelError::InternalError("Could not issue token".to_string())
        })
    }

    /// Authenticate a request from its Authorization header
    /// DOCUMENTATION: Expects "Bearer <token>", rejects anything else
    pub fn authenticate(req: &HttpRequest, config: &Config) -> Result<AuthUser, TravelError> {
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                log::warn!("Request without Authorization header");
                TravelError::Unauthorized
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            log::warn!("Authorization header is not a bearer token");
            TravelError::Unauthorized
        })?;

        Self::decode_token(token, config)
    }

    /// Decode and verify a bearer token
    pub fn decode_token(token: &str, config: &Config) -> Result<AuthUser, TravelError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            log::warn!("Token rejected: {}", e);
            TravelError::Unauthorized
        })?;

        let id = Uuid::parse_str(&data.claims.sub).map_err(|_| TravelError::Unauthorized)?;

        Ok(AuthUser {
            id,
            role: UserRole::from_str(&data.claims.role),
        })
    }

    /// Register a new customer account
    /// DOCUMENTATION: Every self-registered account starts at the
    /// "user" rung, staff roles are granted by an admin afterwards
    pub async fn register(
        pool: &PgPool,
        config: &Config,
        req: &RegisterRequest,
    ) -> Result<(User, String), TravelError> {
        if UserRepository::email_exists(pool, &req.email).await? {
            return Err(TravelError::AlreadyExists(format!(
                "Email '{}' is already registered",
                req.email
            )));
        }

        let password_hash = Self::hash_password(&req.password)?;

        let locale = match req.preferred_locale.as_deref() {
            Some("ar") => "ar",
            _ => "en",
        };

        let user = UserRepository::create_user(
            pool,
            &req.name,
            &req.email.trim().to_lowercase(),
            &password_hash,
            req.phone.as_deref(),
            "user",
            locale,
        )
        .await?;

        let token = Self::issue_token(&user, config)?;

        log::info!("Registered user: {}", user.id);
        Ok((user, token))
    }

    /// Authenticate credentials and issue a token
    /// A wrong email and a wrong password fail identically
    pub async fn login(
        pool: &PgPool,
        config: &Config,
        req: &LoginRequest,
    ) -> Result<(User, String), TravelError> {
        let user = UserRepository::find_by_email(pool, &req.email)
            .await?
            .ok_or_else(|| {
                log::warn!("Login attempt for unknown email");
                TravelError::Unauthorized
            })?;

        if !user.is_active {
            log::warn!("Login attempt for deactivated user {}", user.id);
            return Err(TravelError::Unauthorized);
        }

        if !Self::verify_password(&req.password, &user.password_hash)? {
            log::warn!("Failed login for user {}", user.id);
            return Err(TravelError::Unauthorized);
        }

        UserRepository::record_login(pool, user.id).await?;

        let token = Self::issue_token(&user, config)?;

        log::info!("User logged in: {}", user.id);
        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgresql://test".to_string(),
            server_address: "127.0.0.1".to_string(),
            server_port: 8004,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            jwt_secret: "unit-test-secret".to_string(),
            jwt_expiry_hours: 24,
            tbo_base_url: "https://example.test".to_string(),
            tbo_client_id: String::new(),
            tbo_api_key: String::new(),
            stats_cache_ttl: 300,
            default_currency: "USD".to_string(),
            db_max_connections: 5,
            db_connection_timeout: 30,
        }
    }

    fn test_user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password_hash: String::new(),
            phone: None,
            role: role.to_string(),
            preferred_locale: "en".to_string(),
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = AuthService::hash_password("s3cret-password").unwrap();

        assert!(AuthService::verify_password("s3cret-password", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = AuthService::hash_password("same-input").unwrap();
        let second = AuthService::hash_password("same-input").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_token_roundtrip() {
        let config = test_config();
        let user = test_user("editor");

        let token = AuthService::issue_token(&user, &config).unwrap();
        let auth = AuthService::decode_token(&token, &config).unwrap();

        assert_eq!(auth.id, user.id);
        assert_eq!(auth.role, UserRole::Editor);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let config = test_config();
        let user = test_user("user");

        let token = AuthService::issue_token(&user, &config).unwrap();

        let mut other = test_config();
        other.jwt_secret = "another-secret".to_string();

        assert!(AuthService::decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_role_ladder() {
        assert!(!UserRole::User.is_staff());
        assert!(UserRole::Editor.is_staff());
        assert!(UserRole::Admin.is_staff());
        assert_eq!(UserRole::from_str("nonsense"), UserRole::User);
    }

    #[test]
    fn test_require_staff() {
        let customer = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::User,
        };
        let editor = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Editor,
        };

        assert!(customer.require_staff().is_err());
        assert!(editor.require_staff().is_ok());
        assert!(editor.require_admin().is_err());
    }

    #[test]
    fn test_can_access_user() {
        let id = Uuid::new_v4();
        let customer = AuthUser {
            id,
            role: UserRole::User,
        };

        assert!(customer.can_access_user(id).is_ok());
        assert!(customer.can_access_user(Uuid::new_v4()).is_err());

        let admin = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        assert!(admin.can_access_user(Uuid::new_v4()).is_ok());
    }
}
