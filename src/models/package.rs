// src/models/package.rs
// DOCUMENTATION: Travel package data structures
// PURPOSE: Database model and request/response DTOs for sellable itineraries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a travel package record from the database
/// DOCUMENTATION: Maps directly to the packages table
/// Localized content is carried in paired _en/_ar columns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// URL-safe unique slug derived from the English title
    pub slug: String,

    /// English title
    pub title_en: String,

    /// Arabic title
    pub title_ar: Option<String>,

    /// English long description
    pub description_en: Option<String>,

    /// Arabic long description
    pub description_ar: Option<String>,

    /// Destination this package visits
    pub destination_id: Option<Uuid>,

    /// Trip category (honeymoon, family, adventure...)
    pub category_id: Option<Uuid>,

    /// Hotel bundled with the package, if any
    pub hotel_id: Option<Uuid>,

    /// Trip length in nights
    pub duration_nights: i32,

    /// Base price per person in base_currency
    pub base_price: f64,

    /// Discounted price, shown when lower than base_price
    pub sale_price: Option<f64>,

    /// ISO currency code the prices are quoted in
    pub base_currency: String,

    /// Maximum travellers per booking
    pub max_travellers: i32,

    /// Whether the package appears in public listings
    pub is_published: bool,

    /// Whether the package is pinned on the landing page
    pub is_featured: bool,

    /// Itinerary day-by-day entries as JSON
    pub itinerary: Option<serde_json::Value>,

    /// Included services as JSON list
    pub inclusions: Option<serde_json::Value>,

    /// Excluded services as JSON list
    pub exclusions: Option<serde_json::Value>,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a package
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreatePackageRequest {
    /// English title (required, slug is derived from it)
    #[validate(length(min = 1, max = 255))]
    pub title_en: String,

    pub title_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub destination_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub hotel_id: Option<Uuid>,

    /// Trip length in nights (required)
    #[validate(range(min = 1, max = 90))]
    pub duration_nights: i32,

    /// Base price per person (required)
    #[validate(range(min = 0.0))]
    pub base_price: f64,

    pub sale_price: Option<f64>,

    /// Defaults to the service currency when omitted
    pub base_currency: Option<String>,

    #[validate(range(min = 1, max = 50))]
    pub max_travellers: Option<i32>,

    #[serde(default)]
    pub is_published: Option<bool>,

    #[serde(default)]
    pub is_featured: Option<bool>,

    pub itinerary: Option<serde_json::Value>,
    pub inclusions: Option<serde_json::Value>,
    pub exclusions: Option<serde_json::Value>,
}

/// Request DTO for updating a package
/// All fields are optional - only provided fields will be updated
/// A changed title_en regenerates the slug
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdatePackageRequest {
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub destination_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub hotel_id: Option<Uuid>,
    pub duration_nights: Option<i32>,
    pub base_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub base_currency: Option<String>,
    pub max_travellers: Option<i32>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub itinerary: Option<serde_json::Value>,
    pub inclusions: Option<serde_json::Value>,
    pub exclusions: Option<serde_json::Value>,
}

/// Response DTO for package data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageResponse {
    pub id: Uuid,
    pub slug: String,
    pub title_en: String,
    pub title_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub destination_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub hotel_id: Option<Uuid>,
    pub duration_nights: i32,
    pub base_price: f64,
    pub sale_price: Option<f64>,
    pub base_currency: String,
    pub max_travellers: i32,
    pub is_published: bool,
    pub is_featured: bool,
    pub itinerary: Option<serde_json::Value>,
    pub inclusions: Option<serde_json::Value>,
    pub exclusions: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for GET /packages
#[derive(Debug, Deserialize)]
pub struct PackageListQuery {
    /// Title/description substring filter
    pub q: Option<String>,

    /// Filter by destination
    pub destination_id: Option<Uuid>,

    /// Filter by category
    pub category_id: Option<Uuid>,

    /// Filter by featured flag
    pub featured: Option<bool>,

    /// Minimum effective price
    pub min_price: Option<f64>,

    /// Maximum effective price
    pub max_price: Option<f64>,

    /// Include unpublished packages (staff only)
    pub include_unpublished: Option<bool>,

    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Paginated package list
#[derive(Debug, Serialize)]
pub struct PackageListResponse {
    pub data: Vec<PackageResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

/// Response DTO for GET /packages/{id_or_slug}
/// DOCUMENTATION: Package plus its linked hotel and media in one payload
#[derive(Debug, Serialize)]
pub struct PackageDetailResponse {
    pub package: PackageResponse,
    pub hotel: Option<crate::models::hotel::HotelResponse>,
    pub media: Vec<crate::models::media::MediaResponse>,
}

impl Package {
    /// Convert Package to PackageResponse for API
    pub fn to_response(&self) -> PackageResponse {
        PackageResponse {
            id: self.id,
            slug: self.slug.clone(),
            title_en: self.title_en.clone(),
            title_ar: self.title_ar.clone(),
            description_en: self.description_en.clone(),
            description_ar: self.description_ar.clone(),
            destination_id: self.destination_id,
            category_id: self.category_id,
            hotel_id: self.hotel_id,
            duration_nights: self.duration_nights,
            base_price: self.base_price,
            sale_price: self.sale_price,
            base_currency: self.base_currency.clone(),
            max_travellers: self.max_travellers,
            is_published: self.is_published,
            is_featured: self.is_featured,
            itinerary: self.itinerary.clone(),
            inclusions: self.inclusions.clone(),
            exclusions: self.exclusions.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Price a customer actually pays per person
    /// Sale price wins only when set and lower than base
    pub fn effective_price(&self) -> f64 {
        match self.sale_price {
            Some(sale) if sale < self.base_price => sale,
            _ => self.base_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_package() -> Package {
        Package {
            id: Uuid::new_v4(),
            slug: "desert-escape".to_string(),
            title_en: "Desert Escape".to_string(),
            title_ar: None,
            description_en: None,
            description_ar: None,
            destination_id: None,
            category_id: None,
            hotel_id: None,
            duration_nights: 4,
            base_price: 800.0,
            sale_price: None,
            base_currency: "USD".to_string(),
            max_travellers: 10,
            is_published: true,
            is_featured: false,
            itinerary: None,
            inclusions: None,
            exclusions: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_price_without_sale() {
        let package = sample_package();
        assert_eq!(package.effective_price(), 800.0);
    }

    #[test]
    fn test_effective_price_with_sale() {
        let mut package = sample_package();
        package.sale_price = Some(650.0);
        assert_eq!(package.effective_price(), 650.0);
    }

    #[test]
    fn test_effective_price_ignores_higher_sale() {
        let mut package = sample_package();
        package.sale_price = Some(900.0);
        assert_eq!(package.effective_price(), 800.0);
    }
}
