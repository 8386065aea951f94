// src/db/category_repository.rs
// DOCUMENTATION: Category database operations
// PURPOSE: CRUD over the two category taxonomies, which share a schema

use crate::errors::TravelError;
use crate::models::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// Trip category taxonomy (honeymoon, family, adventure...)
pub struct CategoryRepository;

/// Activity category taxonomy (diving, safari, city tour...)
pub struct ActivityCategoryRepository;

impl CategoryRepository {
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Category>, TravelError> {
        list_rows(pool, "categories", include_inactive).await
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Category, TravelError> {
        get_row(pool, "categories", id).await
    }

    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, TravelError> {
        slug_taken(pool, "categories", slug).await
    }

    pub async fn create(
        pool: &PgPool,
        slug: &str,
        req: &CreateCategoryRequest,
    ) -> Result<Category, TravelError> {
        insert_row(pool, "categories", slug, req).await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCategoryRequest,
        new_slug: Option<&str>,
    ) -> Result<Category, TravelError> {
        update_row(pool, "categories", id, req, new_slug).await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        delete_row(pool, "categories", id).await
    }
}

impl ActivityCategoryRepository {
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Category>, TravelError> {
        list_rows(pool, "activity_categories", include_inactive).await
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Category, TravelError> {
        get_row(pool, "activity_categories", id).await
    }

    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, TravelError> {
        slug_taken(pool, "activity_categories", slug).await
    }

    pub async fn create(
        pool: &PgPool,
        slug: &str,
        req: &CreateCategoryRequest,
    ) -> Result<Category, TravelError> {
        insert_row(pool, "activity_categories", slug, req).await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCategoryRequest,
        new_slug: Option<&str>,
    ) -> Result<Category, TravelError> {
        update_row(pool, "activity_categories", id, req, new_slug).await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        delete_row(pool, "activity_categories", id).await
    }
}

// The table name is always one of the two constants above, never input

async fn list_rows(
    pool: &PgPool,
    table: &str,
    include_inactive: bool,
) -> Result<Vec<Category>, TravelError> {
    let sql = if include_inactive {
        format!("SELECT * FROM {} ORDER BY sort_order ASC, name_en ASC", table)
    } else {
        format!(
            "SELECT * FROM {} WHERE is_active = true ORDER BY sort_order ASC, name_en ASC",
            table
        )
    };

    sqlx::query_as::<_, Category>(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list {}: {}", table, e);
            TravelError::DatabaseError(e.to_string())
        })
}

async fn get_row(pool: &PgPool, table: &str, id: Uuid) -> Result<Category, TravelError> {
    let sql = format!("SELECT * FROM {} WHERE id = $1", table);

    sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching from {}: {}", table, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| {
            log::warn!("Category not found in {}: {}", table, id);
            TravelError::NotFound(format!("Category '{}' not found", id))
        })
}

async fn slug_taken(pool: &PgPool, table: &str, slug: &str) -> Result<bool, TravelError> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE slug = $1)", table);

    let row: (bool,) = sqlx::query_as(&sql)
        .bind(slug)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Slug existence check failed on {}: {}", table, e);
            TravelError::DatabaseError(e.to_string())
        })?;

    Ok(row.0)
}

async fn insert_row(
    pool: &PgPool,
    table: &str,
    slug: &str,
    req: &CreateCategoryRequest,
) -> Result<Category, TravelError> {
    let sql = format!(
        r#"
        INSERT INTO {} (
            slug, name_en, name_ar, description_en, description_ar,
            icon, sort_order, is_active, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
        RETURNING *
        "#,
        table
    );

    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(slug)
        .bind(&req.name_en)
        .bind(&req.name_ar)
        .bind(&req.description_en)
        .bind(&req.description_ar)
        .bind(&req.icon)
        .bind(req.sort_order.unwrap_or(0))
        .bind(req.is_active.unwrap_or(true))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create category in {}: {}", table, e);
            TravelError::DatabaseError(e.to_string())
        })?;

    log::info!("Created category {} in {}", category.id, table);
    Ok(category)
}

async fn update_row(
    pool: &PgPool,
    table: &str,
    id: Uuid,
    req: &UpdateCategoryRequest,
    new_slug: Option<&str>,
) -> Result<Category, TravelError> {
    // Verify the row exists
    let _ = get_row(pool, table, id).await?;

    let sql = format!(
        r#"
        UPDATE {}
        SET slug = COALESCE($1, slug),
            name_en = COALESCE($2, name_en),
            name_ar = COALESCE($3, name_ar),
            description_en = COALESCE($4, description_en),
            description_ar = COALESCE($5, description_ar),
            icon = COALESCE($6, icon),
            sort_order = COALESCE($7, sort_order),
            is_active = COALESCE($8, is_active),
            updated_at = NOW()
        WHERE id = $9
        RETURNING *
        "#,
        table
    );

    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(new_slug)
        .bind(&req.name_en)
        .bind(&req.name_ar)
        .bind(&req.description_en)
        .bind(&req.description_ar)
        .bind(&req.icon)
        .bind(req.sort_order)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for category {} in {}: {}", id, table, e);
            TravelError::DatabaseError(e.to_string())
        })?;

    log::info!("Updated category {} in {}", id, table);
    Ok(category)
}

async fn delete_row(pool: &PgPool, table: &str, id: Uuid) -> Result<(), TravelError> {
    let sql = format!("DELETE FROM {} WHERE id = $1", table);

    let rows = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Delete failed for category {} in {}: {}", id, table, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .rows_affected();

    if rows == 0 {
        return Err(TravelError::NotFound(format!(
            "Category '{}' not found",
            id
        )));
    }

    log::info!("Deleted category {} from {}", id, table);
    Ok(())
}
