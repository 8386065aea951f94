// src/db/destination_repository.rs
// DOCUMENTATION: Destination database operations
// PURPOSE: Storage for the places packages travel to

use crate::errors::TravelError;
use crate::models::{CreateDestinationRequest, Destination, UpdateDestinationRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct DestinationRepository;

impl DestinationRepository {
    /// List destinations
    /// DOCUMENTATION: featured=Some(true) narrows to landing-page rows
    pub async fn list(
        pool: &PgPool,
        featured: Option<bool>,
        include_inactive: bool,
    ) -> Result<Vec<Destination>, TravelError> {
        let mut where_clauses = Vec::new();

        if !include_inactive {
            where_clauses.push("is_active = true".to_string());
        }

        if let Some(featured) = featured {
            where_clauses.push(format!("is_featured = {}", featured));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM destinations {} ORDER BY name_en ASC",
            where_clause
        );

        sqlx::query_as::<_, Destination>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list destinations: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Retrieve destination by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Destination, TravelError> {
        sqlx::query_as::<_, Destination>("SELECT * FROM destinations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching destination: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Destination not found: {}", id);
                TravelError::NotFound(format!("Destination '{}' not found", id))
            })
    }

    /// Check whether a slug is already taken
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, TravelError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM destinations WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Slug existence check failed: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        Ok(row.0)
    }

    /// Create new destination
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        req: &CreateDestinationRequest,
    ) -> Result<Destination, TravelError> {
        let destination = sqlx::query_as::<_, Destination>(
            r#"
            INSERT INTO destinations (
                slug, name_en, name_ar, country_code,
                description_en, description_ar, image_url,
                is_featured, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(slug)
        .bind(&req.name_en)
        .bind(&req.name_ar)
        .bind(req.country_code.to_uppercase())
        .bind(&req.description_en)
        .bind(&req.description_ar)
        .bind(&req.image_url)
        .bind(req.is_featured.unwrap_or(false))
        .bind(req.is_active.unwrap_or(true))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create destination: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Created destination with id: {}", destination.id);
        Ok(destination)
    }

    /// Update existing destination
    /// DOCUMENTATION: Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateDestinationRequest,
        new_slug: Option<&str>,
    ) -> Result<Destination, TravelError> {
        // Verify destination exists
        let _ = Self::get_by_id(pool, id).await?;

        let destination = sqlx::query_as::<_, Destination>(
            r#"
            UPDATE destinations
            SET slug = COALESCE($1, slug),
                name_en = COALESCE($2, name_en),
                name_ar = COALESCE($3, name_ar),
                country_code = COALESCE($4, country_code),
                description_en = COALESCE($5, description_en),
                description_ar = COALESCE($6, description_ar),
                image_url = COALESCE($7, image_url),
                is_featured = COALESCE($8, is_featured),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(new_slug)
        .bind(&req.name_en)
        .bind(&req.name_ar)
        .bind(req.country_code.as_ref().map(|c| c.to_uppercase()))
        .bind(&req.description_en)
        .bind(&req.description_ar)
        .bind(&req.image_url)
        .bind(req.is_featured)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for destination {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated destination: {}", id);
        Ok(destination)
    }

    /// Delete destination
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for destination {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!(
                "Destination '{}' not found",
                id
            )));
        }

        log::info!("Deleted destination: {}", id);
        Ok(())
    }
}
