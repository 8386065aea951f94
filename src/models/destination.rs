// src/models/destination.rs
// DOCUMENTATION: Destination data structures
// PURPOSE: Model and DTOs for the places packages travel to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a destination record from the database
/// DOCUMENTATION: Maps directly to the destinations table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Destination {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// URL-safe unique slug derived from the English name
    pub slug: String,

    /// English name
    pub name_en: String,

    /// Arabic name
    pub name_ar: Option<String>,

    /// ISO country code
    pub country_code: String,

    /// English description
    pub description_en: Option<String>,

    /// Arabic description
    pub description_ar: Option<String>,

    /// Hero image URL for listings
    pub image_url: Option<String>,

    /// Whether the destination is pinned on the landing page
    pub is_featured: bool,

    /// Whether the destination appears in public listings
    pub is_active: bool,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a destination
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateDestinationRequest {
    /// English name (required, slug is derived from it)
    #[validate(length(min = 1, max = 120))]
    pub name_en: String,

    pub name_ar: Option<String>,

    /// Two-letter ISO country code
    #[validate(length(equal = 2))]
    pub country_code: String,

    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub image_url: Option<String>,

    #[serde(default)]
    pub is_featured: Option<bool>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request DTO for updating a destination
/// All fields are optional - only provided fields will be updated
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateDestinationRequest {
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub country_code: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// Response DTO for destination data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationResponse {
    pub id: Uuid,
    pub slug: String,
    pub name_en: String,
    pub name_ar: Option<String>,
    pub country_code: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for GET /destinations
#[derive(Debug, Deserialize)]
pub struct DestinationListQuery {
    /// Filter by featured flag
    pub featured: Option<bool>,

    /// Include inactive entries (staff only)
    pub include_inactive: Option<bool>,
}

impl Destination {
    /// Convert Destination to DestinationResponse for API
    pub fn to_response(&self) -> DestinationResponse {
        DestinationResponse {
            id: self.id,
            slug: self.slug.clone(),
            name_en: self.name_en.clone(),
            name_ar: self.name_ar.clone(),
            country_code: self.country_code.clone(),
            description_en: self.description_en.clone(),
            description_ar: self.description_ar.clone(),
            image_url: self.image_url.clone(),
            is_featured: self.is_featured,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
