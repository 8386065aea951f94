// src/models/translation.rs
// DOCUMENTATION: UI translation data structures
// PURPOSE: Model and DTOs for locale string catalogs served to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents one translated UI string from the database
/// DOCUMENTATION: Maps directly to the translations table
/// (locale, key) is unique
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Translation {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Locale code: en or ar
    pub locale: String,

    /// Dotted lookup key, e.g. nav.home
    pub key: String,

    /// Translated text
    pub value: String,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// One entry of a bulk upsert payload
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TranslationUpsertItem {
    #[validate(length(min = 1, max = 255))]
    pub key: String,

    pub value: String,
}

/// Request DTO for PUT /translations/{locale}
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BulkUpsertRequest {
    #[validate]
    pub entries: Vec<TranslationUpsertItem>,
}

/// Response DTO for PUT /translations/{locale}
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkUpsertResponse {
    pub locale: String,

    /// Keys written for the first time
    pub created: i64,

    /// Keys that already existed and were overwritten
    pub updated: i64,
}
