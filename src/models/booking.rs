// src/models/booking.rs
// DOCUMENTATION: Booking data structures
// PURPOSE: Database model and DTOs for the reservation lifecycle

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a booking record from the database
/// DOCUMENTATION: Maps directly to the bookings table
/// status tracks the customer-facing lifecycle, supplier_status the
/// hotel supplier leg of it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Human-facing reference, RHL- followed by 8 characters
    pub reference: String,

    /// Account that placed the booking
    pub user_id: Uuid,

    /// Booked package
    pub package_id: Uuid,

    /// Hotel the stay resolves to (package hotel unless overridden)
    pub hotel_id: Option<Uuid>,

    /// Stay start date
    pub check_in: NaiveDate,

    /// Stay end date (exclusive)
    pub check_out: NaiveDate,

    /// Number of travellers
    pub travellers: i32,

    /// Number of rooms reserved
    pub rooms: i32,

    /// Contact name for this trip
    pub contact_name: String,

    /// Contact email for this trip
    pub contact_email: String,

    /// Contact phone for this trip
    pub contact_phone: Option<String>,

    /// Free-form customer notes
    pub special_requests: Option<String>,

    /// Lifecycle status: pending, confirmed, cancelled, completed
    pub status: String,

    /// Supplier leg status: confirmed, fallback, cancelled, none
    pub supplier_status: String,

    /// Supplier-side confirmation number, when the supplier answered
    pub supplier_reference: Option<String>,

    /// Raw supplier confirmation payload as JSON
    pub supplier_confirmation: Option<serde_json::Value>,

    /// Coupon code applied at creation, uppercased
    pub coupon_code: Option<String>,

    /// Price before discount
    pub base_amount: f64,

    /// Discount taken off the base amount
    pub discount_amount: f64,

    /// Amount actually charged
    pub total_amount: f64,

    /// ISO currency code for the amounts
    pub currency: String,

    /// Append-only audit trail of lifecycle steps as a JSON array
    pub history: serde_json::Value,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Insert payload assembled by the booking service
/// DOCUMENTATION: Every pricing and supplier decision is already made
/// by the time this struct exists
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub reference: String,
    pub user_id: Uuid,
    pub package_id: Uuid,
    pub hotel_id: Option<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub travellers: i32,
    pub rooms: i32,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub special_requests: Option<String>,
    pub status: String,
    pub supplier_status: String,
    pub supplier_reference: Option<String>,
    pub supplier_confirmation: Option<serde_json::Value>,
    pub coupon_code: Option<String>,
    pub base_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub currency: String,
    pub history: serde_json::Value,
}

/// Request DTO for POST /bookings
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateBookingRequest {
    /// Package being booked (required)
    pub package_id: Uuid,

    /// Hotel override, defaults to the package hotel
    pub hotel_id: Option<Uuid>,

    /// Stay start date (required)
    pub check_in: NaiveDate,

    /// Stay end date, must be after check_in (required)
    pub check_out: NaiveDate,

    /// Number of travellers (required)
    #[validate(range(min = 1, max = 50))]
    pub travellers: i32,

    /// Number of rooms, defaults to 1
    #[validate(range(min = 1, max = 20))]
    pub rooms: Option<i32>,

    #[validate(length(min = 1, max = 255))]
    pub contact_name: String,

    #[validate(email)]
    pub contact_email: String,

    pub contact_phone: Option<String>,

    pub special_requests: Option<String>,

    /// Coupon code, matched case-insensitively
    pub coupon_code: Option<String>,
}

/// Response DTO for booking data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub reference: String,
    pub user_id: Uuid,
    pub package_id: Uuid,
    pub hotel_id: Option<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub travellers: i32,
    pub rooms: i32,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub special_requests: Option<String>,
    pub status: String,
    pub supplier_status: String,
    pub supplier_reference: Option<String>,
    pub coupon_code: Option<String>,
    pub base_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub currency: String,
    pub history: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for GET /bookings
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    /// Filter by lifecycle status
    pub status: Option<String>,

    /// Filter by account
    pub user_id: Option<Uuid>,

    /// Filter by package
    pub package_id: Option<Uuid>,

    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Paginated booking list
#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub data: Vec<BookingResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

/// Request DTO for PUT /bookings/{id}/status
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateBookingStatusRequest {
    /// Target status: pending, confirmed, cancelled, completed
    #[validate(length(min = 1))]
    pub status: String,
}

impl Booking {
    /// Convert Booking to BookingResponse for API
    /// Drops the raw supplier payload, which stays server-side
    pub fn to_response(&self) -> BookingResponse {
        BookingResponse {
            id: self.id,
            reference: self.reference.clone(),
            user_id: self.user_id,
            package_id: self.package_id,
            hotel_id: self.hotel_id,
            check_in: self.check_in,
            check_out: self.check_out,
            travellers: self.travellers,
            rooms: self.rooms,
            contact_name: self.contact_name.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            special_requests: self.special_requests.clone(),
            status: self.status.clone(),
            supplier_status: self.supplier_status.clone(),
            supplier_reference: self.supplier_reference.clone(),
            coupon_code: self.coupon_code.clone(),
            base_amount: self.base_amount,
            discount_amount: self.discount_amount,
            total_amount: self.total_amount,
            currency: self.currency.clone(),
            history: self.history.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
