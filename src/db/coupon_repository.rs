// src/db/coupon_repository.rs
// DOCUMENTATION: Coupon database operations
// PURPOSE: Storage and redemption accounting for discount codes

use crate::errors::TravelError;
use crate::models::{Coupon, CreateCouponRequest, UpdateCouponRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CouponRepository;

impl CouponRepository {
    /// List all coupons, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Coupon>, TravelError> {
        sqlx::query_as::<_, Coupon>("SELECT * FROM coupons ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list coupons: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Retrieve coupon by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Coupon, TravelError> {
        sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching coupon: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Coupon not found: {}", id);
                TravelError::NotFound(format!("Coupon '{}' not found", id))
            })
    }

    /// Retrieve coupon by code, case-insensitively
    /// DOCUMENTATION: Returns None rather than NotFound, callers turn a
    /// miss into a validation verdict
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Coupon>, TravelError> {
        sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE UPPER(code) = UPPER($1)")
            .bind(code)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching coupon by code: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Create new coupon, code stored uppercase
    pub async fn create(pool: &PgPool, req: &CreateCouponRequest) -> Result<Coupon, TravelError> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            INSERT INTO coupons (
                code, description, discount_type, discount_value,
                min_order_amount, max_discount_amount,
                valid_from, valid_until, max_uses, used_count,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(req.code.trim().to_uppercase())
        .bind(&req.description)
        .bind(&req.discount_type)
        .bind(req.discount_value)
        .bind(req.min_order_amount)
        .bind(req.max_discount_amount)
        .bind(req.valid_from)
        .bind(req.valid_until)
        .bind(req.max_uses)
        .bind(req.is_active.unwrap_or(true))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            // Unique violation on code
            if let Some(db_err) = e.as_database_error() {
                if db_err.code().as_deref() == Some("23505") {
                    return TravelError::AlreadyExists(format!(
                        "Coupon code '{}' already exists",
                        req.code.to_uppercase()
                    ));
                }
            }
            log::error!("Failed to create coupon: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Created coupon {} with id: {}", coupon.code, coupon.id);
        Ok(coupon)
    }

    /// Update existing coupon
    /// DOCUMENTATION: Partial update - only provided fields are modified
    /// The code itself is immutable once issued
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCouponRequest,
    ) -> Result<Coupon, TravelError> {
        // Verify coupon exists
        let _ = Self::get_by_id(pool, id).await?;

        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            UPDATE coupons
            SET description = COALESCE($1, description),
                discount_type = COALESCE($2, discount_type),
                discount_value = COALESCE($3, discount_value),
                min_order_amount = COALESCE($4, min_order_amount),
                max_discount_amount = COALESCE($5, max_discount_amount),
                valid_from = COALESCE($6, valid_from),
                valid_until = COALESCE($7, valid_until),
                max_uses = COALESCE($8, max_uses),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&req.description)
        .bind(&req.discount_type)
        .bind(req.discount_value)
        .bind(req.min_order_amount)
        .bind(req.max_discount_amount)
        .bind(req.valid_from)
        .bind(req.valid_until)
        .bind(req.max_uses)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for coupon {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated coupon: {}", id);
        Ok(coupon)
    }

    /// Delete coupon
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for coupon {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("Coupon '{}' not found", id)));
        }

        log::info!("Deleted coupon: {}", id);
        Ok(())
    }

    /// Count one redemption against the coupon
    /// DOCUMENTATION: The WHERE guard re-checks max_uses so two bookings
    /// racing on the last slot cannot both win
    pub async fn increment_usage(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query(
            r#"
            UPDATE coupons
            SET used_count = used_count + 1,
                updated_at = NOW()
            WHERE id = $1
              AND is_active = true
              AND (max_uses IS NULL OR used_count < max_uses)
            "#,
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Usage increment failed for coupon {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(TravelError::InvalidInput(
                "Coupon is no longer redeemable".to_string(),
            ));
        }

        Ok(())
    }
}
