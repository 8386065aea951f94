// src/services/booking_service.rs
// DOCUMENTATION: Booking creation, lookup, status changes and cancellation
// PURPOSE: Owns the whole booking flow from pricing through supplier
// confirmation, recording a fallback booking when the supplier fails

use crate::config::Config;
use crate::db::{BookingRepository, CouponRepository, HotelRepository, PackageRepository};
use crate::errors::TravelError;
use crate::models::{
    Booking, BookingListQuery, BookingListResponse, BookingResponse, CreateBookingRequest, Hotel,
    NewBooking,
};
use crate::services::auth::AuthUser;
use crate::services::pricing::{round2, PricingService};
use crate::services::tbo_client::{
    TboBookRequest, TboBookingConfirmation, TboClient, TboCustomerDetail, TboCustomerName,
};
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgPool;
use std::cmp::Ordering;
use uuid::Uuid;

/// Lifecycle states a booking can hold
pub const BOOKING_STATUSES: [&str; 4] = ["pending", "confirmed", "cancelled", "completed"];

const REFERENCE_PREFIX: &str = "RHL-";
const REFERENCE_ATTEMPTS: usize = 5;

pub struct BookingService;

impl BookingService {
    /// Create a booking
    /// DOCUMENTATION: Loads and prices the package, validates the coupon,
    /// then runs the supplier leg. A mapped TBO hotel is booked live with
    /// search, prebook and book. Any supplier failure downgrades the
    /// booking to a pending fallback instead of refusing the customer.
    /// Unmapped hotels draw from the local room inventory.
    pub async fn create_booking(
        pool: &PgPool,
        config: &Config,
        user: &AuthUser,
        req: &CreateBookingRequest,
    ) -> Result<BookingResponse, TravelError> {
        // Stay window
        let nights = PricingService::nights(req.check_in, req.check_out);
        if nights <= 0 {
            return Err(TravelError::InvalidInput(
                "check_out must be after check_in".to_string(),
            ));
        }
        if req.check_in < Utc::now().date_naive() {
            return Err(TravelError::InvalidInput(
                "check_in cannot be in the past".to_string(),
            ));
        }

        let package = PackageRepository::get_by_id(pool, req.package_id).await?;
        if !package.is_published {
            log::warn!("Booking attempt on unpublished package {}", package.id);
            return Err(TravelError::InvalidInput(
                "Package is not open for booking".to_string(),
            ));
        }

        let rooms = req.rooms.unwrap_or(1);

        // Explicit hotel override wins over the package default
        let hotel = match req.hotel_id.or(package.hotel_id) {
            Some(hotel_id) => Some(HotelRepository::get_by_id(pool, hotel_id).await?),
            None => None,
        };
        if let Some(h) = &hotel {
            if !h.is_active {
                return Err(TravelError::InvalidInput(format!(
                    "Hotel '{}' is not accepting bookings",
                    h.name_en
                )));
            }
        }

        // The coupon is checked against the undiscounted order
        let base_amount = round2(package.effective_price() * req.travellers as f64);
        let coupon = match &req.coupon_code {
            Some(code) => {
                let found = CouponRepository::find_by_code(pool, code).await?.ok_or_else(|| {
                    log::warn!("Unknown coupon '{}' on booking attempt", code);
                    TravelError::InvalidInput(format!(
                        "Coupon '{}' was not found",
                        code.trim().to_uppercase()
                    ))
                })?;
                PricingService::check_coupon(&found, base_amount)
                    .map_err(TravelError::InvalidInput)?;
                Some(found)
            }
            None => None,
        };

        let price = PricingService::price_booking(
            &package,
            req.travellers,
            req.check_in,
            req.check_out,
            coupon.as_ref(),
        )?;

        let reference = Self::generate_reference(pool).await?;

        let mut history = vec![serde_json::json!({
            "step": "priced",
            "at": Utc::now(),
            "base_amount": price.base_amount,
            "discount_amount": price.discount_amount,
            "total_amount": price.total_amount,
        })];

        // Supplier leg: TBO for mapped hotels, local inventory otherwise
        let mut reserved_hotel: Option<Uuid> = None;
        let (status, supplier_status, supplier_reference, supplier_confirmation) = match &hotel {
            Some(h) if h.tbo_hotel_code.is_some() && config.tbo_configured() => {
                match Self::book_with_tbo(config, h, req, &reference).await {
                    Ok(confirmation) => {
                        history.push(serde_json::json!({
                            "step": "supplier_confirmed",
                            "at": Utc::now(),
                            "confirmation_number": confirmation.confirmation_number,
                        }));
                        let payload = serde_json::to_value(&confirmation)
                            .map_err(|e| TravelError::InternalError(e.to_string()))?;
                        (
                            "confirmed",
                            "confirmed",
                            Some(confirmation.confirmation_number),
                            Some(payload),
                        )
                    }
                    Err(e) => {
                        log::warn!(
                            "TBO booking failed for {} ({}), recording fallback",
                            reference,
                            e
                        );
                        history.push(serde_json::json!({
                            "step": "supplier_fallback",
                            "at": Utc::now(),
                            "error": e.to_string(),
                        }));
                        // Placeholder payload so support can replay the leg later
                        let payload = serde_json::json!({
                            "fallback": true,
                            "provider": "tbo",
                            "hotel_code": h.tbo_hotel_code,
                            "error": e.to_string(),
                            "generated_at": Utc::now(),
                        });
                        ("pending", "fallback", None, Some(payload))
                    }
                }
            }
            Some(h) => {
                let remaining = HotelRepository::reserve_rooms(pool, h.id, rooms).await?;
                reserved_hotel = Some(h.id);
                history.push(serde_json::json!({
                    "step": "rooms_reserved",
                    "at": Utc::now(),
                    "hotel_id": h.id,
                    "rooms": rooms,
                    "remaining": remaining,
                }));
                ("confirmed", "none", None, None)
            }
            // Package without a hotel, nothing to reserve
            None => ("confirmed", "none", None, None),
        };

        history.push(serde_json::json!({
            "step": "created",
            "at": Utc::now(),
            "by": user.id,
        }));

        let new_booking = NewBooking {
            reference: reference.clone(),
            user_id: user.id,
            package_id: package.id,
            hotel_id: hotel.as_ref().map(|h| h.id),
            check_in: req.check_in,
            check_out: req.check_out,
            travellers: req.travellers,
            rooms,
            contact_name: req.contact_name.trim().to_string(),
            contact_email: req.contact_email.trim().to_lowercase(),
            contact_phone: req.contact_phone.clone(),
            special_requests: req.special_requests.clone(),
            status: status.to_string(),
            supplier_status: supplier_status.to_string(),
            supplier_reference,
            supplier_confirmation,
            coupon_code: coupon.as_ref().map(|c| c.code.clone()),
            base_amount: price.base_amount,
            discount_amount: price.discount_amount,
            total_amount: price.total_amount,
            currency: price.currency.clone(),
            history: serde_json::Value::Array(history),
        };

        let booking = match BookingRepository::create_booking(pool, &new_booking).await {
            Ok(b) => b,
            Err(e) => {
                // Hand reserved rooms back before surfacing the error
                if let Some(hotel_id) = reserved_hotel {
                    if let Err(release_err) =
                        HotelRepository::release_rooms(pool, hotel_id, rooms).await
                    {
                        log::error!(
                            "Could not release {} rooms on hotel {} after failed insert: {}",
                            rooms,
                            hotel_id,
                            release_err
                        );
                    }
                }
                return Err(e);
            }
        };

        if let Some(c) = &coupon {
            // Redemption count is best effort, the booking stands either way
            if let Err(e) = CouponRepository::increment_usage(pool, c.id).await {
                log::warn!("Could not count redemption of coupon {}: {}", c.code, e);
            }
        }

        log::info!(
            "Booking {} created for user {}: {} / {:.2} {}",
            booking.reference,
            user.id,
            booking.status,
            booking.total_amount,
            booking.currency
        );

        Ok(booking.to_response())
    }

    /// Get a booking by ID (UUID or reference)
    pub async fn get_booking(
        pool: &PgPool,
        user: &AuthUser,
        identifier: &str,
    ) -> Result<BookingResponse, TravelError> {
        let booking = Self::resolve(pool, identifier).await?;
        user.can_access_user(booking.user_id)?;
        Ok(booking.to_response())
    }

    /// List bookings, staff see everything, customers only their own
    pub async fn list_bookings(
        pool: &PgPool,
        user: &AuthUser,
        query: BookingListQuery,
    ) -> Result<BookingListResponse, TravelError> {
        let restrict_to_user = if user.role.is_staff() {
            None
        } else {
            Some(user.id)
        };
        Self::paginate(pool, query, restrict_to_user).await
    }

    /// Bookings of the authenticated account only
    pub async fn my_bookings(
        pool: &PgPool,
        user: &AuthUser,
        query: BookingListQuery,
    ) -> Result<BookingListResponse, TravelError> {
        Self::paginate(pool, query, Some(user.id)).await
    }

    /// Staff status transition
    /// Cancellations carry supplier side effects, so they route through
    /// the cancel flow instead of a bare column update
    pub async fn update_status(
        pool: &PgPool,
        config: &Config,
        user: &AuthUser,
        id: Uuid,
        status: &str,
    ) -> Result<BookingResponse, TravelError> {
        let status = status.trim().to_lowercase();
        if !BOOKING_STATUSES.contains(&status.as_str()) {
            return Err(TravelError::InvalidInput(format!(
                "Unknown booking status '{}'",
                status
            )));
        }

        if status == "cancelled" {
            return Self::cancel_booking(pool, config, user, id).await;
        }

        let step = serde_json::json!({
            "step": "status_changed",
            "at": Utc::now(),
            "to": status,
            "by": user.id,
        });
        let booking = BookingRepository::update_status(pool, id, &status, &step).await?;
        Ok(booking.to_response())
    }

    /// Cancel a booking
    /// DOCUMENTATION: Owner or staff only. A supplier-confirmed booking is
    /// cancelled at TBO first, a locally reserved one hands its rooms
    /// back. A supplier refusal does not block the local cancellation.
    pub async fn cancel_booking(
        pool: &PgPool,
        config: &Config,
        user: &AuthUser,
        id: Uuid,
    ) -> Result<BookingResponse, TravelError> {
        let booking = BookingRepository::get_by_id(pool, id).await?;
        user.can_access_user(booking.user_id)?;

        if booking.status == "cancelled" {
            return Err(TravelError::InvalidInput(
                "Booking is already cancelled".to_string(),
            ));
        }
        if booking.status == "completed" {
            return Err(TravelError::InvalidInput(
                "Completed bookings cannot be cancelled".to_string(),
            ));
        }

        if booking.supplier_status == "confirmed" {
            if let Some(confirmation) = &booking.supplier_reference {
                if config.tbo_configured() {
                    let client = TboClient::new(
                        config.tbo_base_url.clone(),
                        config.tbo_client_id.clone(),
                        config.tbo_api_key.clone(),
                    );
                    match client.cancel_booking(confirmation).await {
                        Ok(result) => {
                            let step = serde_json::json!({
                                "step": "supplier_cancelled",
                                "at": Utc::now(),
                                "confirmation_number": result.confirmation_number,
                                "refund_amount": result.refund_amount,
                            });
                            BookingRepository::update_supplier_result(
                                pool,
                                id,
                                "cancelled",
                                Some(confirmation.as_str()),
                                &step,
                            )
                            .await?;
                        }
                        Err(e) => {
                            // Support retries the supplier side by hand
                            log::warn!(
                                "TBO cancellation failed for {} ({}), continuing with local cancel",
                                confirmation,
                                e
                            );
                        }
                    }
                } else {
                    log::warn!(
                        "Booking {} holds supplier confirmation {} but TBO is not configured",
                        booking.reference,
                        confirmation
                    );
                }
            }
        } else if booking.supplier_status == "none" {
            if let Some(hotel_id) = booking.hotel_id {
                HotelRepository::release_rooms(pool, hotel_id, booking.rooms).await?;
                log::info!(
                    "Released {} rooms on hotel {} for cancelled booking {}",
                    booking.rooms,
                    hotel_id,
                    booking.reference
                );
            }
        }

        let step = serde_json::json!({
            "step": "cancelled",
            "at": Utc::now(),
            "by": user.id,
        });
        let cancelled = BookingRepository::update_status(pool, id, "cancelled", &step).await?;

        log::info!("Booking {} cancelled by user {}", cancelled.reference, user.id);

        Ok(cancelled.to_response())
    }

    /// Search, prebook and book one mapped hotel at TBO
    async fn book_with_tbo(
        config: &Config,
        hotel: &Hotel,
        req: &CreateBookingRequest,
        reference: &str,
    ) -> Result<TboBookingConfirmation, TravelError> {
        let code = hotel.tbo_hotel_code.clone().ok_or_else(|| {
            TravelError::InternalError("Hotel has no supplier mapping".to_string())
        })?;
        let rooms = req.rooms.unwrap_or(1);
        let adults = Self::adults_per_room(req.travellers, rooms);

        let client = TboClient::new(
            config.tbo_base_url.clone(),
            config.tbo_client_id.clone(),
            config.tbo_api_key.clone(),
        );

        let results = client
            .search_hotels(&[code.clone()], req.check_in, req.check_out, rooms, adults)
            .await?;
        let result = results
            .into_iter()
            .find(|r| r.hotel_code == code)
            .ok_or_else(|| {
                TravelError::ExternalApiError(format!(
                    "No availability at supplier hotel {}",
                    code
                ))
            })?;

        // Cheapest rate wins
        let room = result
            .rooms
            .into_iter()
            .min_by(|a, b| {
                a.total_fare
                    .partial_cmp(&b.total_fare)
                    .unwrap_or(Ordering::Equal)
            })
            .ok_or_else(|| {
                TravelError::ExternalApiError("Supplier returned no bookable room".to_string())
            })?;

        // Prebook pins the fare TBO will actually charge
        let rate = client.prebook(&room.booking_code).await?;

        let request = TboBookRequest {
            booking_code: rate.booking_code.clone(),
            customer_details: Self::customer_details(&req.contact_name, rooms, adults),
            client_reference_id: reference.to_string(),
            booking_reference_id: reference.to_string(),
            total_fare: rate.total_fare,
            email_id: req.contact_email.clone(),
            phone_number: req.contact_phone.clone().unwrap_or_default(),
            booking_type: "Voucher".to_string(),
            payment_mode: "Limit".to_string(),
        };

        client.book(&request).await
    }

    async fn paginate(
        pool: &PgPool,
        query: BookingListQuery,
        restrict_to_user: Option<Uuid>,
    ) -> Result<BookingListResponse, TravelError> {
        let (bookings, total_count) =
            BookingRepository::list(pool, &query, restrict_to_user).await?;

        let limit = query.limit.unwrap_or(20).max(1);
        let page = query.page.unwrap_or(1).max(1);
        let has_more = total_count > (page * limit);

        Ok(BookingListResponse {
            data: bookings.iter().map(|b| b.to_response()).collect(),
            total_count,
            page,
            limit,
            has_more,
        })
    }

    async fn resolve(pool: &PgPool, identifier: &str) -> Result<Booking, TravelError> {
        if let Ok(uuid) = Uuid::parse_str(identifier) {
            BookingRepository::get_by_id(pool, uuid).await
        } else {
            BookingRepository::get_by_reference(pool, identifier).await
        }
    }

    /// Allocate a reference no other booking holds
    async fn generate_reference(pool: &PgPool) -> Result<String, TravelError> {
        for _ in 0..REFERENCE_ATTEMPTS {
            let reference = Self::random_reference();
            if !BookingRepository::reference_exists(pool, &reference).await? {
                return Ok(reference);
            }
        }
        Err(TravelError::InternalError(
            "Could not allocate a booking reference".to_string(),
        ))
    }

    fn random_reference() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(|b| (b as char).to_ascii_uppercase())
            .collect();
        format!("{}{}", REFERENCE_PREFIX, suffix)
    }

    /// TBO wants the adult count per room, travellers spread evenly
    fn adults_per_room(travellers: i32, rooms: i32) -> i32 {
        let rooms = rooms.max(1);
        ((travellers + rooms - 1) / rooms).max(1)
    }

    /// TBO requires a name per pax slot, only the lead name is collected
    fn customer_details(
        contact_name: &str,
        rooms: i32,
        adults_per_room: i32,
    ) -> Vec<TboCustomerDetail> {
        let (first_name, last_name) = Self::split_contact_name(contact_name);
        (0..rooms.max(1))
            .map(|room| {
                let customer_names = (0..adults_per_room.max(1))
                    .map(|slot| {
                        let first = if room == 0 && slot == 0 {
                            first_name.clone()
                        } else {
                            "Guest".to_string()
                        };
                        TboCustomerName {
                            title: "Mr".to_string(),
                            first_name: first,
                            last_name: last_name.clone(),
                            type_: "Adult".to_string(),
                        }
                    })
                    .collect();
                TboCustomerDetail { customer_names }
            })
            .collect()
    }

    /// TBO refuses empty last names, single-word names are duplicated
    fn split_contact_name(name: &str) -> (String, String) {
        let trimmed = name.trim();
        match trimmed.rsplit_once(' ') {
            Some((first, last)) => (first.trim().to_string(), last.to_string()),
            None => (trimmed.to_string(), trimmed.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_contact_name_two_words() {
        let (first, last) = BookingService::split_contact_name("Layla Hassan");
        assert_eq!(first, "Layla");
        assert_eq!(last, "Hassan");
    }

    #[test]
    fn test_split_contact_name_middle_names_go_first() {
        let (first, last) = BookingService::split_contact_name("Omar Al Farsi");
        assert_eq!(first, "Omar Al");
        assert_eq!(last, "Farsi");
    }

    #[test]
    fn test_split_contact_name_single_word_duplicates() {
        let (first, last) = BookingService::split_contact_name("Madonna");
        assert_eq!(first, "Madonna");
        assert_eq!(last, "Madonna");
    }

    #[test]
    fn test_random_reference_format() {
        let reference = BookingService::random_reference();
        assert!(reference.starts_with("RHL-"));
        assert_eq!(reference.len(), 12);
        let suffix = &reference[4..];
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_random_references_differ() {
        // Two draws colliding would mean a broken generator
        let a = BookingService::random_reference();
        let b = BookingService::random_reference();
        assert_ne!(a, b);
    }

    #[test]
    fn test_adults_per_room_even_split() {
        assert_eq!(BookingService::adults_per_room(4, 2), 2);
        assert_eq!(BookingService::adults_per_room(1, 1), 1);
    }

    #[test]
    fn test_adults_per_room_rounds_up() {
        assert_eq!(BookingService::adults_per_room(5, 2), 3);
        assert_eq!(BookingService::adults_per_room(3, 4), 1);
    }

    #[test]
    fn test_customer_details_fill_every_slot() {
        let details = BookingService::customer_details("Layla Hassan", 2, 2);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].customer_names.len(), 2);
        assert_eq!(details[0].customer_names[0].first_name, "Layla");
        assert_eq!(details[0].customer_names[1].first_name, "Guest");
        assert_eq!(details[1].customer_names[0].last_name, "Hassan");
    }

    #[test]
    fn test_statuses_cover_the_lifecycle() {
        assert!(BOOKING_STATUSES.contains(&"pending"));
        assert!(BOOKING_STATUSES.contains(&"confirmed"));
        assert!(BOOKING_STATUSES.contains(&"cancelled"));
        assert!(BOOKING_STATUSES.contains(&"completed"));
    }
}
