// src/db/hotel_repository.rs
// DOCUMENTATION: Hotel database operations
// PURPOSE: Inventory storage for hotels and their room counts

use crate::errors::TravelError;
use crate::models::{CreateHotelRequest, Hotel, HotelListQuery, UpdateHotelRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct HotelRepository;

impl HotelRepository {
    /// Create new hotel
    /// DOCUMENTATION: available_rooms starts at total_rooms
    pub async fn create_hotel(
        pool: &PgPool,
        slug: &str,
        req: &CreateHotelRequest,
    ) -> Result<Hotel, TravelError> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (
                slug, name_en, name_ar, description_en, description_ar,
                city, country_code, destination_id, address, star_rating,
                tbo_hotel_code, price_per_night, available_rooms, total_rooms,
                amenities, is_active, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, $10,
                $11, $12, $13, $13,
                $14, $15, NOW(), NOW()
            )
            RETURNING *
            "#,
        )
        .bind(slug) // $1
        .bind(&req.name_en) // $2
        .bind(&req.name_ar) // $3
        .bind(&req.description_en) // $4
        .bind(&req.description_ar) // $5
        .bind(&req.city) // $6
        .bind(req.country_code.to_uppercase()) // $7
        .bind(req.destination_id) // $8
        .bind(&req.address) // $9
        .bind(req.star_rating) // $10
        .bind(&req.tbo_hotel_code) // $11
        .bind(req.price_per_night) // $12
        .bind(req.total_rooms) // $13
        .bind(&req.amenities) // $14
        .bind(req.is_active.unwrap_or(true)) // $15
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create hotel: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Created hotel with id: {}", hotel.id);
        Ok(hotel)
    }

    /// Retrieve hotel by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Hotel, TravelError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching hotel: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Hotel not found: {}", id);
                TravelError::NotFound(format!("Hotel '{}' not found", id))
            })
    }

    /// Retrieve hotel by slug
    pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<Hotel, TravelError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching hotel by slug {}: {}", slug, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Hotel not found with slug: {}", slug);
                TravelError::NotFound(format!("Hotel '{}' not found", slug))
            })
    }

    /// Check whether a slug is already taken
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, TravelError> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM hotels WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Slug existence check failed: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok(row.0)
    }

    /// List hotels with filters
    /// DOCUMENTATION: Used for GET /hotels endpoint
    /// Returns tuple: (results, total_count) for pagination
    pub async fn list(
        pool: &PgPool,
        query: &HotelListQuery,
        allow_inactive: bool,
    ) -> Result<(Vec<Hotel>, i64), TravelError> {
        let limit = query.limit.unwrap_or(20).min(100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        // Build dynamic query based on provided filters
        let mut where_clauses = Vec::new();

        let include_inactive = allow_inactive && query.include_inactive.unwrap_or(false);
        if !include_inactive {
            where_clauses.push("is_active = true".to_string());
        }

        if let Some(q) = &query.q {
            let escaped = q.replace("'", "''");
            where_clauses.push(format!(
                "(name_en ILIKE '%{}%' OR name_ar ILIKE '%{}%')",
                escaped, escaped
            ));
        }

        if let Some(city) = &query.city {
            where_clauses.push(format!("city ILIKE '%{}%'", city.replace("'", "''")));
        }

        if let Some(destination_id) = query.destination_id {
            where_clauses.push(format!("destination_id = '{}'", destination_id));
        }

        if let Some(min_stars) = query.min_stars {
            where_clauses.push(format!("star_rating >= {}", min_stars));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM hotels {}", where_clause);
        let count_result: (i64,) =
            sqlx::query_as(&count_sql)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Count query error: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        let sql = format!(
            "SELECT * FROM hotels {} ORDER BY star_rating DESC NULLS LAST, name_en ASC LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );

        let hotels = sqlx::query_as::<_, Hotel>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Hotel list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok((hotels, count_result.0))
    }

    /// Find active hotels in a city with enough rooms on sale
    /// DOCUMENTATION: Local inventory leg of GET /hotels/search
    pub async fn search_by_city(
        pool: &PgPool,
        city: &str,
        rooms_wanted: i32,
    ) -> Result<Vec<Hotel>, TravelError> {
        sqlx::query_as::<_, Hotel>(
            r#"
            SELECT * FROM hotels
            WHERE is_active = true
              AND city ILIKE $1
              AND available_rooms >= $2
            ORDER BY star_rating DESC NULLS LAST, price_per_night ASC
            "#,
        )
        .bind(format!("%{}%", city))
        .bind(rooms_wanted)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Hotel city search failed for {}: {}", city, e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Find active hotels in a city that carry a supplier code
    /// DOCUMENTATION: These rows drive the TBO search request
    pub async fn find_tbo_hotels_by_city(
        pool: &PgPool,
        city: &str,
    ) -> Result<Vec<Hotel>, TravelError> {
        sqlx::query_as::<_, Hotel>(
            r#"
            SELECT * FROM hotels
            WHERE is_active = true
              AND city ILIKE $1
              AND tbo_hotel_code IS NOT NULL
            ORDER BY star_rating DESC NULLS LAST
            "#,
        )
        .bind(format!("%{}%", city))
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("TBO hotel lookup failed for {}: {}", city, e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Update existing hotel
    /// DOCUMENTATION: Partial update - only provided fields are modified
    pub async fn update_hotel(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateHotelRequest,
        new_slug: Option<&str>,
    ) -> Result<Hotel, TravelError> {
        // Verify hotel exists
        let _ = Self::get_by_id(pool, id).await?;

        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            UPDATE hotels
            SET slug = COALESCE($1, slug),
                name_en = COALESCE($2, name_en),
                name_ar = COALESCE($3, name_ar),
                description_en = COALESCE($4, description_en),
                description_ar = COALESCE($5, description_ar),
                city = COALESCE($6, city),
                country_code = COALESCE($7, country_code),
                destination_id = COALESCE($8, destination_id),
                address = COALESCE($9, address),
                star_rating = COALESCE($10, star_rating),
                tbo_hotel_code = COALESCE($11, tbo_hotel_code),
                price_per_night = COALESCE($12, price_per_night),
                available_rooms = COALESCE($13, available_rooms),
                total_rooms = COALESCE($14, total_rooms),
                amenities = COALESCE($15, amenities),
                is_active = COALESCE($16, is_active),
                updated_at = NOW()
            WHERE id = $17
            RETURNING *
            "#,
        )
        .bind(new_slug)
        .bind(&req.name_en)
        .bind(&req.name_ar)
        .bind(&req.description_en)
        .bind(&req.description_ar)
        .bind(&req.city)
        .bind(req.country_code.as_ref().map(|c| c.to_uppercase()))
        .bind(req.destination_id)
        .bind(&req.address)
        .bind(req.star_rating)
        .bind(&req.tbo_hotel_code)
        .bind(req.price_per_night)
        .bind(req.available_rooms)
        .bind(req.total_rooms)
        .bind(&req.amenities)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for hotel {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated hotel: {}", id);
        Ok(hotel)
    }

    /// Soft delete hotel
    /// DOCUMENTATION: Sets is_active=false instead of physical deletion
    pub async fn delete_hotel(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows =
            sqlx::query("UPDATE hotels SET is_active = false, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Delete failed for hotel {}: {}", id, e);
                    TravelError::DatabaseError(e.to_string())
                })?
                .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("Hotel '{}' not found", id)));
        }

        log::info!("Deleted hotel: {}", id);
        Ok(())
    }

    /// Take rooms off sale for a confirmed local stay
    /// DOCUMENTATION: The WHERE guard makes reservation atomic, zero
    /// affected rows means another booking got there first
    pub async fn reserve_rooms(pool: &PgPool, id: Uuid, rooms: i32) -> Result<i32, TravelError> {
        let updated: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE hotels
            SET available_rooms = available_rooms - $2,
                updated_at = NOW()
            WHERE id = $1 AND available_rooms >= $2
            RETURNING available_rooms
            "#,
        )
        .bind(id)
        .bind(rooms)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Room reservation failed for hotel {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        match updated {
            Some((remaining,)) => {
                log::info!(
                    "Reserved {} rooms at hotel {}, {} remaining",
                    rooms,
                    id,
                    remaining
                );
                Ok(remaining)
            }
            None => Err(TravelError::InvalidInput(format!(
                "Hotel '{}' does not have {} rooms available",
                id, rooms
            ))),
        }
    }

    /// Put rooms back on sale after a cancellation
    /// Never exceeds total_rooms
    pub async fn release_rooms(pool: &PgPool, id: Uuid, rooms: i32) -> Result<(), TravelError> {
        sqlx::query(
            r#"
            UPDATE hotels
            SET available_rooms = LEAST(available_rooms + $2, total_rooms),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(rooms)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Room release failed for hotel {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Released {} rooms at hotel {}", rooms, id);
        Ok(())
    }
}
