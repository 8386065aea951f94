// src/db/booking_repository.rs
// DOCUMENTATION: Booking database operations
// PURPOSE: Persist reservations and their lifecycle transitions

use crate::errors::TravelError;
use crate::models::{Booking, BookingListQuery, NewBooking};
use sqlx::PgPool;
use uuid::Uuid;

pub struct BookingRepository;

impl BookingRepository {
    /// Insert a fully-priced booking
    /// DOCUMENTATION: The booking service assembles NewBooking, this
    /// is a plain insert
    pub async fn create_booking(
        pool: &PgPool,
        booking: &NewBooking,
    ) -> Result<Booking, TravelError> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                reference, user_id, package_id, hotel_id,
                check_in, check_out, travellers, rooms,
                contact_name, contact_email, contact_phone, special_requests,
                status, supplier_status, supplier_reference, supplier_confirmation,
                coupon_code, base_amount, discount_amount, total_amount, currency,
                history, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8,
                $9, $10, $11, $12,
                $13, $14, $15, $16,
                $17, $18, $19, $20, $21,
                $22, NOW(), NOW()
            )
            RETURNING *
            "#,
        )
        .bind(&booking.reference) // $1
        .bind(booking.user_id) // $2
        .bind(booking.package_id) // $3
        .bind(booking.hotel_id) // $4
        .bind(booking.check_in) // $5
        .bind(booking.check_out) // $6
        .bind(booking.travellers) // $7
        .bind(booking.rooms) // $8
        .bind(&booking.contact_name) // $9
        .bind(&booking.contact_email) // $10
        .bind(&booking.contact_phone) // $11
        .bind(&booking.special_requests) // $12
        .bind(&booking.status) // $13
        .bind(&booking.supplier_status) // $14
        .bind(&booking.supplier_reference) // $15
        .bind(&booking.supplier_confirmation) // $16
        .bind(&booking.coupon_code) // $17
        .bind(booking.base_amount) // $18
        .bind(booking.discount_amount) // $19
        .bind(booking.total_amount) // $20
        .bind(&booking.currency) // $21
        .bind(&booking.history) // $22
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create booking {}: {}", booking.reference, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!(
            "Created booking {} with id: {}",
            created.reference,
            created.id
        );
        Ok(created)
    }

    /// Retrieve booking by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Booking, TravelError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching booking: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Booking not found: {}", id);
                TravelError::NotFound(format!("Booking '{}' not found", id))
            })
    }

    /// Retrieve booking by human-facing reference
    pub async fn get_by_reference(pool: &PgPool, reference: &str) -> Result<Booking, TravelError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE reference = $1")
            .bind(reference)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching booking {}: {}", reference, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Booking not found with reference: {}", reference);
                TravelError::NotFound(format!("Booking '{}' not found", reference))
            })
    }

    /// List bookings with filters
    /// DOCUMENTATION: Used for GET /bookings (staff) and GET /bookings/mine
    /// Returns tuple: (results, total_count) for pagination
    pub async fn list(
        pool: &PgPool,
        query: &BookingListQuery,
        restrict_to_user: Option<Uuid>,
    ) -> Result<(Vec<Booking>, i64), TravelError> {
        let limit = query.limit.unwrap_or(20).min(100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        // Build dynamic query based on provided filters
        let mut where_clauses = vec!["1 = 1".to_string()];

        // An owner scope beats any user_id filter in the query string
        if let Some(owner) = restrict_to_user {
            where_clauses.push(format!("user_id = '{}'", owner));
        } else if let Some(user_id) = query.user_id {
            where_clauses.push(format!("user_id = '{}'", user_id));
        }

        if let Some(status) = &query.status {
            where_clauses.push(format!("status = '{}'", status.replace("'", "''")));
        }

        if let Some(package_id) = query.package_id {
            where_clauses.push(format!("package_id = '{}'", package_id));
        }

        let where_clause = format!("WHERE {}", where_clauses.join(" AND "));

        let count_sql = format!("SELECT COUNT(*) FROM bookings {}", where_clause);
        let count_result: (i64,) =
            sqlx::query_as(&count_sql)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Count query error: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        let sql = format!(
            "SELECT * FROM bookings {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );

        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Booking list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok((bookings, count_result.0))
    }

    /// Update booking status and append a history step in one statement
    /// DOCUMENTATION: history is a JSONB array, || appends the new step
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: &str,
        history_step: &serde_json::Value,
    ) -> Result<Booking, TravelError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $1,
                history = history || $2::jsonb,
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(history_step)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Status update failed for booking {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| TravelError::NotFound(format!("Booking '{}' not found", id)))?;

        log::info!("Booking {} moved to status: {}", id, status);
        Ok(booking)
    }

    /// Record the supplier leg outcome on an existing booking
    pub async fn update_supplier_result(
        pool: &PgPool,
        id: Uuid,
        supplier_status: &str,
        supplier_reference: Option<&str>,
        history_step: &serde_json::Value,
    ) -> Result<Booking, TravelError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET supplier_status = $1,
                supplier_reference = COALESCE($2, supplier_reference),
                history = history || $3::jsonb,
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(supplier_status)
        .bind(supplier_reference)
        .bind(history_step)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Supplier update failed for booking {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| TravelError::NotFound(format!("Booking '{}' not found", id)))?;

        Ok(booking)
    }

    /// Check whether a booking reference is already taken
    pub async fn reference_exists(pool: &PgPool, reference: &str) -> Result<bool, TravelError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM bookings WHERE reference = $1)")
                .bind(reference)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Reference existence check failed: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        Ok(row.0)
    }
}
