// src/models/coupon.rs
// DOCUMENTATION: Coupon data structures
// PURPOSE: Model and DTOs for discount codes applied to bookings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a coupon record from the database
/// DOCUMENTATION: Maps directly to the coupons table
/// Codes are stored uppercased and matched case-insensitively
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Coupon {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Discount code, stored uppercase (unique)
    pub code: String,

    /// Admin-facing description
    pub description: Option<String>,

    /// Discount type: percent or fixed
    pub discount_type: String,

    /// Percent (0-100) or fixed amount depending on discount_type
    pub discount_value: f64,

    /// Minimum base amount the order must reach
    pub min_order_amount: Option<f64>,

    /// Ceiling on the discount for percent coupons
    pub max_discount_amount: Option<f64>,

    /// Redemption window start
    pub valid_from: Option<DateTime<Utc>>,

    /// Redemption window end
    pub valid_until: Option<DateTime<Utc>>,

    /// Total redemptions allowed, unlimited when null
    pub max_uses: Option<i32>,

    /// Redemptions so far
    pub used_count: i32,

    /// Kill switch
    pub is_active: bool,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a coupon
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateCouponRequest {
    /// Discount code, uppercased on save (required)
    #[validate(length(min = 2, max = 40))]
    pub code: String,

    pub description: Option<String>,

    /// percent or fixed (required)
    #[validate(length(min = 1))]
    pub discount_type: String,

    /// Discount value (required)
    #[validate(range(min = 0.0))]
    pub discount_value: f64,

    pub min_order_amount: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request DTO for updating a coupon
/// All fields are optional - only provided fields will be updated
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateCouponRequest {
    pub description: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub is_active: Option<bool>,
}

/// Response DTO for coupon data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponResponse {
    pub id: Uuid,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub discount_value: f64,
    pub min_order_amount: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /coupons/validate
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CouponValidateRequest {
    /// Code entered by the customer
    #[validate(length(min = 1, max = 40))]
    pub code: String,

    /// Order base amount the coupon would apply to
    #[validate(range(min = 0.0))]
    pub order_amount: f64,
}

/// Response DTO for POST /coupons/validate
/// DOCUMENTATION: valid=false responses carry a reason instead of a
/// discount so the storefront can show why the code was refused
#[derive(Debug, Serialize, Deserialize)]
pub struct CouponValidateResponse {
    pub code: String,
    pub valid: bool,

    /// Why the coupon was refused, when valid is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Discount the coupon would grant, when valid is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,

    /// Order total after the discount, when valid is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_amount: Option<f64>,
}

impl Coupon {
    /// Convert Coupon to CouponResponse for API
    pub fn to_response(&self) -> CouponResponse {
        CouponResponse {
            id: self.id,
            code: self.code.clone(),
            description: self.description.clone(),
            discount_type: self.discount_type.clone(),
            discount_value: self.discount_value,
            min_order_amount: self.min_order_amount,
            max_discount_amount: self.max_discount_amount,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            max_uses: self.max_uses,
            used_count: self.used_count,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
