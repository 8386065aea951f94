// src/services/pricing.rs
// DOCUMENTATION: Booking price calculation
// PURPOSE: Turn package rates, travellers and coupons into a final amount

use crate::errors::TravelError;
use crate::models::{Coupon, Package};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Price of one booking, broken into its parts
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdown {
    /// Per-person package price used, sale price when lower
    pub unit_price: f64,
    /// Number of travellers charged
    pub travellers: i32,
    /// Nights in the stay window
    pub nights: i64,
    /// unit_price * travellers, before any discount
    pub base_amount: f64,
    /// Discount granted by the coupon
    pub discount_amount: f64,
    /// base_amount - discount_amount, never negative
    pub total_amount: f64,
    pub currency: String,
}

/// PricingService: booking amount arithmetic
/// DOCUMENTATION: Pure calculations, no database access
pub struct PricingService;

impl PricingService {
    /// Nights between check-in and check-out
    pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
        (check_out - check_in).num_days()
    }

    /// Price a stay for a package
    /// DOCUMENTATION: The coupon is assumed already validated, a None
    /// coupon prices the order undiscounted
    pub fn price_booking(
        package: &Package,
        travellers: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        coupon: Option<&Coupon>,
    ) -> Result<PriceBreakdown, TravelError> {
        let nights = Self::nights(check_in, check_out);
        if nights <= 0 {
            return Err(TravelError::InvalidInput(
                "check_out must be after check_in".to_string(),
            ));
        }

        if travellers < 1 {
            return Err(TravelError::InvalidInput(
                "travellers must be at least 1".to_string(),
            ));
        }

        if travellers > package.max_travellers {
            return Err(TravelError::InvalidInput(format!(
                "Package allows at most {} travellers",
                package.max_travellers
            )));
        }

        let unit_price = package.effective_price();
        let base_amount = round2(unit_price * travellers as f64);

        let discount_amount = match coupon {
            Some(coupon) => Self::discount_for(coupon, base_amount),
            None => 0.0,
        };

        let total_amount = round2((base_amount - discount_amount).max(0.0));

        Ok(PriceBreakdown {
            unit_price,
            travellers,
            nights,
            base_amount,
            discount_amount,
            total_amount,
            currency: package.base_currency.clone(),
        })
    }

    /// Discount a coupon grants on an order amount
    /// Percent coupons are capped by max_discount_amount, no coupon
    /// ever discounts past the order itself
    pub fn discount_for(coupon: &Coupon, order_amount: f64) -> f64 {
        let raw = match coupon.discount_type.as_str() {
            "percent" => order_amount * coupon.discount_value / 100.0,
            "fixed" => coupon.discount_value,
            other => {
                log::warn!("Unknown discount type '{}' on coupon {}", other, coupon.code);
                0.0
            }
        };

        let capped = match coupon.max_discount_amount {
            Some(cap) => raw.min(cap),
            None => raw,
        };

        round2(capped.min(order_amount).max(0.0))
    }

    /// Check whether a coupon can be redeemed against an order now
    /// DOCUMENTATION: Returns the refusal reason so callers can surface it
    pub fn check_coupon(coupon: &Coupon, order_amount: f64) -> Result<(), String> {
        if !coupon.is_active {
            return Err("Coupon is not active".to_string());
        }

        let now = Utc::now();

        if let Some(valid_from) = coupon.valid_from {
            if now < valid_from {
                return Err("Coupon is not valid yet".to_string());
            }
        }

        if let Some(valid_until) = coupon.valid_until {
            if now > valid_until {
                return Err("Coupon has expired".to_string());
            }
        }

        if let Some(max_uses) = coupon.max_uses {
            if coupon.used_count >= max_uses {
                return Err("Coupon has reached its usage limit".to_string());
            }
        }

        if let Some(min_order) = coupon.min_order_amount {
            if order_amount < min_order {
                return Err(format!(
                    "Order must be at least {:.2} to use this coupon",
                    min_order
                ));
            }
        }

        Ok(())
    }
}

/// Round to two decimals, away from float dust
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_package(base_price: f64, sale_price: Option<f64>) -> Package {
        Package {
            id: Uuid::new_v4(),
            slug: "sample".to_string(),
            title_en: "Sample".to_string(),
            title_ar: None,
            description_en: None,
            description_ar: None,
            destination_id: None,
            category_id: None,
            hotel_id: None,
            duration_nights: 4,
            base_price,
            sale_price,
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

    fn sample_coupon(discount_type: &str, value: f64) -> Coupon {
        Coupon {
            id: Uuid::new_v4(),
            code: "SAVE10".to_string(),
            description: None,
            discount_type: discount_type.to_string(),
            discount_value: value,
            min_order_amount: None,
            max_discount_amount: None,
            valid_from: None,
            valid_until: None,
            max_uses: None,
            used_count: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dates() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        )
    }

    #[test]
    fn test_price_without_coupon() {
        let package = sample_package(800.0, None);
        let (check_in, check_out) = dates();

        let price =
            PricingService::price_booking(&package, 2, check_in, check_out, None).unwrap();

        assert_eq!(price.nights, 4);
        assert_eq!(price.base_amount, 1600.0);
        assert_eq!(price.discount_amount, 0.0);
        assert_eq!(price.total_amount, 1600.0);
    }

    #[test]
    fn test_price_uses_sale_price() {
        let package = sample_package(800.0, Some(650.0));
        let (check_in, check_out) = dates();

        let price =
            PricingService::price_booking(&package, 2, check_in, check_out, None).unwrap();

        assert_eq!(price.unit_price, 650.0);
        assert_eq!(price.base_amount, 1300.0);
    }

    #[test]
    fn test_percent_coupon() {
        let package = sample_package(800.0, None);
        let coupon = sample_coupon("percent", 10.0);
        let (check_in, check_out) = dates();

        let price =
            PricingService::price_booking(&package, 2, check_in, check_out, Some(&coupon))
                .unwrap();

        assert_eq!(price.discount_amount, 160.0);
        assert_eq!(price.total_amount, 1440.0);
    }

    #[test]
    fn test_percent_coupon_cap() {
        let package = sample_package(800.0, None);
        let mut coupon = sample_coupon("percent", 50.0);
        coupon.max_discount_amount = Some(100.0);
        let (check_in, check_out) = dates();

        let price =
            PricingService::price_booking(&package, 2, check_in, check_out, Some(&coupon))
                .unwrap();

        assert_eq!(price.discount_amount, 100.0);
        assert_eq!(price.total_amount, 1500.0);
    }

    #[test]
    fn test_fixed_coupon_never_goes_negative() {
        let package = sample_package(40.0, None);
        let coupon = sample_coupon("fixed", 100.0);
        let (check_in, check_out) = dates();

        let price =
            PricingService::price_booking(&package, 1, check_in, check_out, Some(&coupon))
                .unwrap();

        // Discount is clamped to the order amount
        assert_eq!(price.discount_amount, 40.0);
        assert_eq!(price.total_amount, 0.0);
    }

    #[test]
    fn test_invalid_stay_window() {
        let package = sample_package(800.0, None);
        let (check_in, _) = dates();

        let result = PricingService::price_booking(&package, 2, check_in, check_in, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_too_many_travellers() {
        let package = sample_package(800.0, None);
        let (check_in, check_out) = dates();

        let result = PricingService::price_booking(&package, 11, check_in, check_out, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_coupon_window() {
        let mut coupon = sample_coupon("percent", 10.0);
        coupon.valid_until = Some(Utc::now() - chrono::Duration::days(1));

        let verdict = PricingService::check_coupon(&coupon, 500.0);
        assert_eq!(verdict, Err("Coupon has expired".to_string()));
    }

    #[test]
    fn test_check_coupon_min_order() {
        let mut coupon = sample_coupon("fixed", 50.0);
        coupon.min_order_amount = Some(1000.0);

        assert!(PricingService::check_coupon(&coupon, 500.0).is_err());
        assert!(PricingService::check_coupon(&coupon, 1200.0).is_ok());
    }

    #[test]
    fn test_check_coupon_usage_limit() {
        let mut coupon = sample_coupon("percent", 10.0);
        coupon.max_uses = Some(5);
        coupon.used_count = 5;

        assert!(PricingService::check_coupon(&coupon, 500.0).is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(10.005), 10.01);
        assert_eq!(round2(1599.9999999999998), 1600.0);
    }
}
