// src/db/package_repository.rs
// DOCUMENTATION: Package database operations
// PURPOSE: Catalog storage for sellable travel packages

use crate::errors::TravelError;
use crate::models::{CreatePackageRequest, Package, PackageListQuery, UpdatePackageRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PackageRepository;

impl PackageRepository {
    /// Create new package
    /// DOCUMENTATION: The service resolves the slug before calling this
    pub async fn create_package(
        pool: &PgPool,
        slug: &str,
        req: &CreatePackageRequest,
        default_currency: &str,
    ) -> Result<Package, TravelError> {
        let package = sqlx::query_as::<_, Package>(
            r#"
            INSERT INTO packages (
                slug, title_en, title_ar, description_en, description_ar,
                destination_id, category_id, hotel_id,
                duration_nights, base_price, sale_price, base_currency,
                max_travellers, is_published, is_featured,
                itinerary, inclusions, exclusions,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8,
                $9, $10, $11, $12,
                $13, $14, $15,
                $16, $17, $18,
                NOW(), NOW()
            )
            RETURNING *
            "#,
        )
        .bind(slug) // $1
        .bind(&req.title_en) // $2
        .bind(&req.title_ar) // $3
        .bind(&req.description_en) // $4
        .bind(&req.description_ar) // $5
        .bind(req.destination_id) // $6
        .bind(req.category_id) // $7
        .bind(req.hotel_id) // $8
        .bind(req.duration_nights) // $9
        .bind(req.base_price) // $10
        .bind(req.sale_price) // $11
        .bind(req.base_currency.as_deref().unwrap_or(default_currency)) // $12
        .bind(req.max_travellers.unwrap_or(10)) // $13
        .bind(req.is_published.unwrap_or(false)) // $14
        .bind(req.is_featured.unwrap_or(false)) // $15
        .bind(&req.itinerary) // $16
        .bind(&req.inclusions) // $17
        .bind(&req.exclusions) // $18
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create package: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Created package with id: {}", package.id);
        Ok(package)
    }

    /// Retrieve package by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Package, TravelError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching package: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Package not found: {}", id);
                TravelError::NotFound(format!("Package '{}' not found", id))
            })
    }

    /// Retrieve package by slug
    /// DOCUMENTATION: Used for GET /packages/{id_or_slug} when the path
    /// segment is not a UUID
    pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<Package, TravelError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching package by slug {}: {}", slug, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Package not found with slug: {}", slug);
                TravelError::NotFound(format!("Package '{}' not found", slug))
            })
    }

    /// Check whether a slug is already taken
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, TravelError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM packages WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Slug existence check failed: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        Ok(row.0)
    }

    /// Search packages with filters
    /// DOCUMENTATION: Used for GET /packages endpoint
    /// Price filters apply to the effective price, sale price when lower
    /// Returns tuple: (results, total_count) for pagination
    pub async fn search(
        pool: &PgPool,
        query: &PackageListQuery,
        allow_unpublished: bool,
    ) -> Result<(Vec<Package>, i64), TravelError> {
        let limit = query.limit.unwrap_or(20).min(100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        // Build dynamic query based on provided filters
        let mut where_clauses = Vec::new();

        let include_unpublished = allow_unpublished && query.include_unpublished.unwrap_or(false);
        if !include_unpublished {
            where_clauses.push("is_published = true".to_string());
        }

        if let Some(q) = &query.q {
            let escaped = q.replace("'", "''");
            where_clauses.push(format!(
                "(title_en ILIKE '%{}%' OR title_ar ILIKE '%{}%' OR description_en ILIKE '%{}%')",
                escaped, escaped, escaped
            ));
        }

        if let Some(destination_id) = query.destination_id {
            where_clauses.push(format!("destination_id = '{}'", destination_id));
        }

        if let Some(category_id) = query.category_id {
            where_clauses.push(format!("category_id = '{}'", category_id));
        }

        if let Some(featured) = query.featured {
            where_clauses.push(format!("is_featured = {}", featured));
        }

        // Effective price window
        if let Some(min_price) = query.min_price {
            where_clauses.push(format!(
                "LEAST(base_price, COALESCE(sale_price, base_price)) >= {}",
                min_price
            ));
        }

        if let Some(max_price) = query.max_price {
            where_clauses.push(format!(
                "LEAST(base_price, COALESCE(sale_price, base_price)) <= {}",
                max_price
            ));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM packages {}", where_clause);
        let count_result: (i64,) =
            sqlx::query_as(&count_sql)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Count query error: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;

        let total = count_result.0;

        let sql = format!(
            "SELECT * FROM packages {} ORDER BY is_featured DESC, created_at DESC LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );

        log::debug!("Executing package search: {}", sql);

        let packages = sqlx::query_as::<_, Package>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Package search query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        log::info!(
            "Package search completed: {} results, {} total (page {})",
            packages.len(),
            total,
            page
        );

        Ok((packages, total))
    }

    /// List featured published packages
    /// DOCUMENTATION: Used for GET /packages/featured, landing page strip
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Package>, TravelError> {
        sqlx::query_as::<_, Package>(
            r#"
            SELECT * FROM packages
            WHERE is_featured = true AND is_published = true
            ORDER BY updated_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit.min(50))
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch featured packages: {}", e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Update existing package
    /// DOCUMENTATION: Partial update - only provided fields are modified
    /// new_slug is set when the service regenerated it for a new title
    pub async fn update_package(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePackageRequest,
        new_slug: Option<&str>,
    ) -> Result<Package, TravelError> {
        // Verify package exists
        let _ = Self::get_by_id(pool, id).await?;

        let package = sqlx::query_as::<_, Package>(
            r#"
            UPDATE packages
            SET slug = COALESCE($1, slug),
                title_en = COALESCE($2, title_en),
                title_ar = COALESCE($3, title_ar),
                description_en = COALESCE($4, description_en),
                description_ar = COALESCE($5, description_ar),
                destination_id = COALESCE($6, destination_id),
                category_id = COALESCE($7, category_id),
                hotel_id = COALESCE($8, hotel_id),
                duration_nights = COALESCE($9, duration_nights),
                base_price = COALESCE($10, base_price),
                sale_price = COALESCE($11, sale_price),
                base_currency = COALESCE($12, base_currency),
                max_travellers = COALESCE($13, max_travellers),
                is_published = COALESCE($14, is_published),
                is_featured = COALESCE($15, is_featured),
                itinerary = COALESCE($16, itinerary),
                inclusions = COALESCE($17, inclusions),
                exclusions = COALESCE($18, exclusions),
                updated_at = NOW()
            WHERE id = $19
            RETURNING *
            "#,
        )
        .bind(new_slug)
        .bind(&req.title_en)
        .bind(&req.title_ar)
        .bind(&req.description_en)
        .bind(&req.description_ar)
        .bind(req.destination_id)
        .bind(req.category_id)
        .bind(req.hotel_id)
        .bind(req.duration_nights)
        .bind(req.base_price)
        .bind(req.sale_price)
        .bind(&req.base_currency)
        .bind(req.max_travellers)
        .bind(req.is_published)
        .bind(req.is_featured)
        .bind(&req.itinerary)
        .bind(&req.inclusions)
        .bind(&req.exclusions)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for package {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated package: {}", id);
        Ok(package)
    }

    /// Delete package
    pub async fn delete_package(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for package {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("Package '{}' not found", id)));
        }

        log::info!("Deleted package: {}", id);
        Ok(())
    }
}
