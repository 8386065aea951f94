// src/models/category.rs
// DOCUMENTATION: Category data structures
// PURPOSE: Shared model for trip categories and activity categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a category record from the database
/// DOCUMENTATION: The categories and activity_categories tables share
/// this shape, so one model serves both taxonomies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// URL-safe unique slug derived from the English name
    pub slug: String,

    /// English name
    pub name_en: String,

    /// Arabic name
    pub name_ar: Option<String>,

    /// English description
    pub description_en: Option<String>,

    /// Arabic description
    pub description_ar: Option<String>,

    /// Icon identifier for the dashboard
    pub icon: Option<String>,

    /// Manual ordering weight, lower sorts first
    pub sort_order: i32,

    /// Whether the category appears in public listings
    pub is_active: bool,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a category
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateCategoryRequest {
    /// English name (required, slug is derived from it)
    #[validate(length(min = 1, max = 120))]
    pub name_en: String,

    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request DTO for updating a category
/// All fields are optional - only provided fields will be updated
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateCategoryRequest {
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Response DTO for category data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub slug: String,
    pub name_en: String,
    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for category listings
#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    /// Include inactive entries (staff only)
    pub include_inactive: Option<bool>,
}

impl Category {
    /// Convert Category to CategoryResponse for API
    pub fn to_response(&self) -> CategoryResponse {
        CategoryResponse {
            id: self.id,
            slug: self.slug.clone(),
            name_en: self.name_en.clone(),
            name_ar: self.name_ar.clone(),
            description_en: self.description_en.clone(),
            description_ar: self.description_ar.clone(),
            icon: self.icon.clone(),
            sort_order: self.sort_order,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
