// src/models/hotel.rs
// DOCUMENTATION: Hotel data structures
// PURPOSE: Database model and DTOs for hotel inventory and search

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a hotel record from the database
/// DOCUMENTATION: Maps directly to the hotels table
/// tbo_hotel_code links the row to the supplier inventory when present
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hotel {
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

    /// City the hotel is in
    pub city: String,

    /// ISO country code
    pub country_code: String,

    /// Destination the hotel belongs to
    pub destination_id: Option<Uuid>,

    /// Street address
    pub address: Option<String>,

    /// Star rating, 1 to 5
    pub star_rating: Option<i32>,

    /// Supplier hotel code, set when the hotel is bookable through TBO
    pub tbo_hotel_code: Option<String>,

    /// Nightly price per room in base currency
    pub price_per_night: f64,

    /// Rooms currently open for sale from local inventory
    pub available_rooms: i32,

    /// Total rooms the hotel holds for us
    pub total_rooms: i32,

    /// Amenity names as a JSON list
    pub amenities: Option<serde_json::Value>,

    /// Whether the hotel appears in public listings
    pub is_active: bool,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a hotel
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateHotelRequest {
    /// English name (required, slug is derived from it)
    #[validate(length(min = 1, max = 255))]
    pub name_en: String,

    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,

    #[validate(length(min = 1, max = 120))]
    pub city: String,

    /// Two-letter ISO country code
    #[validate(length(equal = 2))]
    pub country_code: String,

    pub destination_id: Option<Uuid>,
    pub address: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub star_rating: Option<i32>,

    pub tbo_hotel_code: Option<String>,

    #[validate(range(min = 0.0))]
    pub price_per_night: f64,

    #[validate(range(min = 0))]
    pub total_rooms: i32,

    pub amenities: Option<serde_json::Value>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request DTO for updating a hotel
/// All fields are optional - only provided fields will be updated
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateHotelRequest {
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub destination_id: Option<Uuid>,
    pub address: Option<String>,
    pub star_rating: Option<i32>,
    pub tbo_hotel_code: Option<String>,
    pub price_per_night: Option<f64>,
    pub available_rooms: Option<i32>,
    pub total_rooms: Option<i32>,
    pub amenities: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// Response DTO for hotel data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelResponse {
    pub id: Uuid,
    pub slug: String,
    pub name_en: String,
    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub city: String,
    pub country_code: String,
    pub destination_id: Option<Uuid>,
    pub address: Option<String>,
    pub star_rating: Option<i32>,
    pub tbo_hotel_code: Option<String>,
    pub price_per_night: f64,
    pub available_rooms: i32,
    pub total_rooms: i32,
    pub amenities: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for GET /hotels
#[derive(Debug, Deserialize)]
pub struct HotelListQuery {
    /// Name substring filter
    pub q: Option<String>,

    /// Filter by city (case-insensitive)
    pub city: Option<String>,

    /// Filter by destination
    pub destination_id: Option<Uuid>,

    /// Minimum star rating
    pub min_stars: Option<i32>,

    /// Include inactive hotels (staff only)
    pub include_inactive: Option<bool>,

    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Paginated hotel list
#[derive(Debug, Serialize)]
pub struct HotelListResponse {
    pub data: Vec<HotelResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

/// Query parameters for GET /hotels/search
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct HotelSearchQuery {
    /// City to search in (required)
    #[validate(length(min = 1, max = 120))]
    pub city: String,

    /// Stay start date (required)
    pub check_in: NaiveDate,

    /// Stay end date (required)
    pub check_out: NaiveDate,

    /// Rooms wanted, defaults to 1
    pub rooms: Option<i32>,

    /// Adults per room, defaults to 2
    pub adults: Option<i32>,
}

/// One priced offer inside a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOfferResponse {
    pub hotel: HotelResponse,

    /// Nightly rate for this stay
    pub price_per_night: f64,

    /// Whole-stay price for the requested rooms
    pub total_price: f64,

    pub currency: String,

    /// Where the offer came from: "tbo" or "local"
    pub source: String,

    /// Supplier booking token, present only for TBO offers
    pub supplier_code: Option<String>,
}

/// Response DTO for GET /hotels/search
#[derive(Debug, Serialize, Deserialize)]
pub struct HotelSearchResponse {
    pub city: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub offers: Vec<HotelOfferResponse>,

    /// "tbo" when the supplier answered, "local" otherwise
    pub source: String,
}

/// Response DTO for GET /hotels/{id}/availability
#[derive(Debug, Serialize)]
pub struct HotelAvailabilityResponse {
    pub hotel_id: Uuid,
    pub name_en: String,
    pub available_rooms: i32,
    pub total_rooms: i32,
    pub is_active: bool,
}

impl Hotel {
    /// Convert Hotel to HotelResponse for API
    pub fn to_response(&self) -> HotelResponse {
        HotelResponse {
            id: self.id,
            slug: self.slug.clone(),
            name_en: self.name_en.clone(),
            name_ar: self.name_ar.clone(),
            description_en: self.description_en.clone(),
            description_ar: self.description_ar.clone(),
            city: self.city.clone(),
            country_code: self.country_code.clone(),
            destination_id: self.destination_id,
            address: self.address.clone(),
            star_rating: self.star_rating,
            tbo_hotel_code: self.tbo_hotel_code.clone(),
            price_per_night: self.price_per_night,
            available_rooms: self.available_rooms,
            total_rooms: self.total_rooms,
            amenities: self.amenities.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
