// src/models/media.rs
// DOCUMENTATION: Media asset data structures
// PURPOSE: Metadata registry for images attached to catalog entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a media asset record from the database
/// DOCUMENTATION: Maps directly to the media table
/// Only metadata lives here, the bytes stay wherever url points
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Media {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Owning entity kind: package, hotel, destination
    pub entity_type: String,

    /// Owning entity id
    pub entity_id: Uuid,

    /// Public URL of the asset
    pub url: String,

    /// English alt text
    pub alt_en: Option<String>,

    /// Arabic alt text
    pub alt_ar: Option<String>,

    /// MIME type, e.g. image/jpeg
    pub mime_type: Option<String>,

    /// Ordering weight inside the owner's gallery, lower first
    pub sort_order: i32,

    /// Whether this asset is the owner's cover image
    pub is_primary: bool,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for registering a media asset
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateMediaRequest {
    /// package, hotel or destination (required)
    #[validate(length(min = 1))]
    pub entity_type: String,

    /// Owning entity id (required)
    pub entity_id: Uuid,

    /// Public URL of the asset (required)
    #[validate(url)]
    pub url: String,

    pub alt_en: Option<String>,
    pub alt_ar: Option<String>,
    pub mime_type: Option<String>,
    pub sort_order: Option<i32>,

    #[serde(default)]
    pub is_primary: Option<bool>,
}

/// Request DTO for updating a media asset
/// All fields are optional - only provided fields will be updated
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateMediaRequest {
    pub url: Option<String>,
    pub alt_en: Option<String>,
    pub alt_ar: Option<String>,
    pub mime_type: Option<String>,
    pub sort_order: Option<i32>,
    pub is_primary: Option<bool>,
}

/// Response DTO for media data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub url: String,
    pub alt_en: Option<String>,
    pub alt_ar: Option<String>,
    pub mime_type: Option<String>,
    pub sort_order: i32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for GET /media
#[derive(Debug, Deserialize)]
pub struct MediaListQuery {
    /// Filter by owning entity kind
    pub entity_type: Option<String>,

    /// Filter by owning entity id
    pub entity_id: Option<Uuid>,
}

impl Media {
    /// Convert Media to MediaResponse for API
    pub fn to_response(&self) -> MediaResponse {
        MediaResponse {
            id: self.id,
            entity_type: self.entity_type.clone(),
            entity_id: self.entity_id,
            url: self.url.clone(),
            alt_en: self.alt_en.clone(),
            alt_ar: self.alt_ar.clone(),
            mime_type: self.mime_type.clone(),
            sort_order: self.sort_order,
            is_primary: self.is_primary,
            created_at: self.created_at,
        }
    }
}
