// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Account storage for auth and admin user management

use crate::errors::TravelError;
use crate::models::{UpdateUserRequest, User, UserListQuery};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    /// Create a new user account
    /// DOCUMENTATION: The caller hashes the password, this layer never
    /// sees plaintext
    pub async fn create_user(
        pool: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        phone: Option<&str>,
        role: &str,
        preferred_locale: &str,
    ) -> Result<User, TravelError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                name, email, password_hash, phone, role, preferred_locale,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, true, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(role)
        .bind(preferred_locale)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create user {}: {}", email, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Created user with id: {}", user.id);
        Ok(user)
    }

    /// Retrieve user by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<User, TravelError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching user: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("User not found: {}", id);
                TravelError::NotFound(format!("User '{}' not found", id))
            })
    }

    /// Retrieve user by email
    /// DOCUMENTATION: Used by login, email is matched case-insensitively
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, TravelError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching user by email: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Check whether an email is already registered
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, TravelError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Email existence check failed: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        Ok(row.0)
    }

    /// List users with filters
    /// DOCUMENTATION: Used for GET /users endpoint
    /// Returns tuple: (results, total_count) for pagination
    pub async fn list(
        pool: &PgPool,
        query: &UserListQuery,
    ) -> Result<(Vec<User>, i64), TravelError> {
        let limit = query.limit.unwrap_or(20).min(100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        // Build dynamic query based on provided filters
        let mut where_clauses = vec!["1 = 1".to_string()];

        if let Some(q) = &query.q {
            let escaped = q.replace("'", "''");
            where_clauses.push(format!(
                "(name ILIKE '%{}%' OR email ILIKE '%{}%')",
                escaped, escaped
            ));
        }

        if let Some(role) = &query.role {
            where_clauses.push(format!("role = '{}'", role.replace("'", "''")));
        }

        let where_clause = format!("WHERE {}", where_clauses.join(" AND "));

        let count_sql = format!("SELECT COUNT(*) FROM users {}", where_clause);
        let count_result: (i64,) =
            sqlx::query_as(&count_sql)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Count query error: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        let sql = format!(
            "SELECT * FROM users {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("User list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok((users, count_result.0))
    }

    /// Update existing user
    /// DOCUMENTATION: Partial update - only provided fields are modified
    pub async fn update_user(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<User, TravelError> {
        // Verify user exists
        let _ = Self::get_by_id(pool, id).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                role = COALESCE($3, role),
                preferred_locale = COALESCE($4, preferred_locale),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.role)
        .bind(&req.preferred_locale)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for user {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated user: {}", id);
        Ok(user)
    }

    /// Deactivate a user account
    /// DOCUMENTATION: Sets is_active=false instead of physical deletion
    /// so bookings keep a valid owner
    pub async fn deactivate(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows =
            sqlx::query("UPDATE users SET is_active = false, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Deactivate failed for user {}: {}", id, e);
                    TravelError::DatabaseError(e.to_string())
                })?
                .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("User '{}' not found", id)));
        }

        log::info!("Deactivated user: {}", id);
        Ok(())
    }

    /// Record a successful login
    pub async fn record_login(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to record login for user {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
