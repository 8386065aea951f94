// src/db/media_repository.rs
// DOCUMENTATION: Media database operations
// PURPOSE: Metadata registry for gallery images

use crate::errors::TravelError;
use crate::models::{CreateMediaRequest, Media, UpdateMediaRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct MediaRepository;

impl MediaRepository {
    /// Register a new media asset
    /// DOCUMENTATION: A primary asset demotes the previous primary of
    /// the same owner first
    pub async fn create_media(
        pool: &PgPool,
        req: &CreateMediaRequest,
    ) -> Result<Media, TravelError> {
        if req.is_primary.unwrap_or(false) {
            Self::unset_primary(pool, &req.entity_type, req.entity_id).await?;
        }

        let media = sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO media (
                entity_type, entity_id, url, alt_en, alt_ar,
                mime_type, sort_order, is_primary, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&req.entity_type)
        .bind(req.entity_id)
        .bind(&req.url)
        .bind(&req.alt_en)
        .bind(&req.alt_ar)
        .bind(&req.mime_type)
        .bind(req.sort_order.unwrap_or(0))
        .bind(req.is_primary.unwrap_or(false))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create media: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Registered media {} for {} {}", media.id, media.entity_type, media.entity_id);
        Ok(media)
    }

    /// Retrieve media by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Media, TravelError> {
        sqlx::query_as::<_, Media>("SELECT * FROM media WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching media: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Media not found: {}", id);
                TravelError::NotFound(format!("Media '{}' not found", id))
            })
    }

    /// List assets, optionally narrowed to one owner
    /// DOCUMENTATION: Primary first, then gallery order
    pub async fn list(
        pool: &PgPool,
        entity_type: Option<&str>,
        entity_id: Option<Uuid>,
    ) -> Result<Vec<Media>, TravelError> {
        let mut where_clauses = vec!["1 = 1".to_string()];

        if let Some(entity_type) = entity_type {
            where_clauses.push(format!(
                "entity_type = '{}'",
                entity_type.replace("'", "''")
            ));
        }

        if let Some(entity_id) = entity_id {
            where_clauses.push(format!("entity_id = '{}'", entity_id));
        }

        let sql = format!(
            "SELECT * FROM media WHERE {} ORDER BY is_primary DESC, sort_order ASC, created_at ASC",
            where_clauses.join(" AND ")
        );

        sqlx::query_as::<_, Media>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list media: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Fetch one owner's gallery
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<Vec<Media>, TravelError> {
        sqlx::query_as::<_, Media>(
            r#"
            SELECT * FROM media
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY is_primary DESC, sort_order ASC, created_at ASC
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to fetch media for {} {}: {}",
                entity_type,
                entity_id,
                e
            );
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Update existing media asset
    /// DOCUMENTATION: Partial update - only provided fields are modified
    pub async fn update_media(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateMediaRequest,
    ) -> Result<Media, TravelError> {
        // Verify media exists, and learn its owner for primary handling
        let existing = Self::get_by_id(pool, id).await?;

        if req.is_primary == Some(true) {
            Self::unset_primary(pool, &existing.entity_type, existing.entity_id).await?;
        }

        let media = sqlx::query_as::<_, Media>(
            r#"
            UPDATE media
            SET url = COALESCE($1, url),
                alt_en = COALESCE($2, alt_en),
                alt_ar = COALESCE($3, alt_ar),
                mime_type = COALESCE($4, mime_type),
                sort_order = COALESCE($5, sort_order),
                is_primary = COALESCE($6, is_primary),
                updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&req.url)
        .bind(&req.alt_en)
        .bind(&req.alt_ar)
        .bind(&req.mime_type)
        .bind(req.sort_order)
        .bind(req.is_primary)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for media {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated media: {}", id);
        Ok(media)
    }

    /// Delete media asset
    pub async fn delete_media(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for media {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("Media '{}' not found", id)));
        }

        log::info!("Deleted media: {}", id);
        Ok(())
    }

    /// Demote the current primary asset of an owner
    async fn unset_primary(
        pool: &PgPool,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<(), TravelError> {
        sqlx::query(
            r#"
            UPDATE media
            SET is_primary = FALSE
            WHERE entity_type = $1 AND entity_id = $2
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to unset primary media: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
