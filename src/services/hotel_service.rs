// src/services/hotel_service.rs
// DOCUMENTATION: Business logic for hotels and live availability search
// PURPOSE: Joins the local inventory with the TBO supplier, falling back
// to local rates whenever the supplier cannot answer

use crate::config::Config;
use crate::db::HotelRepository;
use crate::errors::TravelError;
use crate::models::{
    CreateHotelRequest, Hotel, HotelAvailabilityResponse, HotelListQuery, HotelListResponse,
    HotelOfferResponse, HotelSearchQuery, HotelSearchResponse, UpdateHotelRequest,
};
use crate::services::cache::ResponseCache;
use crate::services::pricing::{round2, PricingService};
use crate::services::slug;
use crate::services::tbo_client::TboClient;
use sqlx::PgPool;
use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

pub struct HotelService;

impl HotelService {
    /// Create a new hotel with a slug derived from the English name
    pub async fn create_hotel(
        pool: &PgPool,
        req: CreateHotelRequest,
    ) -> Result<crate::models::HotelResponse, TravelError> {
        let slug = slug::find_available_slug(&req.name_en, |candidate| async move {
            HotelRepository::slug_exists(pool, &candidate).await
        })
        .await?;

        let hotel = HotelRepository::create_hotel(pool, &slug, &req).await?;
        Ok(hotel.to_response())
    }

    /// Get a hotel by ID (UUID or slug)
    pub async fn get_by_id_or_slug(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<crate::models::HotelResponse, TravelError> {
        let hotel = Self::resolve(pool, identifier).await?;
        Ok(hotel.to_response())
    }

    /// List hotels with filters and pagination
    pub async fn list(
        pool: &PgPool,
        query: HotelListQuery,
        allow_inactive: bool,
    ) -> Result<HotelListResponse, TravelError> {
        let (hotels, total_count) = HotelRepository::list(pool, &query, allow_inactive).await?;

        let limit = query.limit.unwrap_or(20).max(1);
        let page = query.page.unwrap_or(1).max(1);
        let has_more = total_count > (page * limit);

        Ok(HotelListResponse {
            data: hotels.iter().map(|h| h.to_response()).collect(),
            total_count,
            page,
            limit,
            has_more,
        })
    }

    /// Update a hotel, regenerating the slug when the English name changes
    pub async fn update_hotel(
        pool: &PgPool,
        id: Uuid,
        req: UpdateHotelRequest,
    ) -> Result<crate::models::HotelResponse, TravelError> {
        let new_slug = match &req.name_en {
            Some(name) => {
                let existing = HotelRepository::get_by_id(pool, id).await?;
                if slug::slugify(name) == existing.slug {
                    None
                } else {
                    Some(
                        slug::find_available_slug(name, |candidate| async move {
                            HotelRepository::slug_exists(pool, &candidate).await
                        })
                        .await?,
                    )
                }
            }
            None => None,
        };

        let hotel = HotelRepository::update_hotel(pool, id, &req, new_slug.as_deref()).await?;
        Ok(hotel.to_response())
    }

    /// Deactivate a hotel (soft delete, bookings keep their reference)
    pub async fn delete_hotel(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        HotelRepository::delete_hotel(pool, id).await
    }

    /// Room availability snapshot for one hotel
    pub async fn availability(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<HotelAvailabilityResponse, TravelError> {
        let hotel = Self::resolve(pool, identifier).await?;
        Ok(HotelAvailabilityResponse {
            hotel_id: hotel.id,
            name_en: hotel.name_en,
            available_rooms: hotel.available_rooms,
            total_rooms: hotel.total_rooms,
            is_active: hotel.is_active,
        })
    }

    /// Search hotels in a city for a stay window
    /// DOCUMENTATION: Tries the TBO supplier first when credentials are
    /// configured, then falls back to the locally priced inventory
    pub async fn search(
        pool: &PgPool,
        config: &Config,
        cache: Arc<ResponseCache>,
        query: HotelSearchQuery,
    ) -> Result<HotelSearchResponse, TravelError> {
        let nights = PricingService::nights(query.check_in, query.check_out);
        if nights <= 0 {
            return Err(TravelError::InvalidInput(
                "check_out must be after check_in".to_string(),
            ));
        }

        let rooms = query.rooms.unwrap_or(1).max(1);
        let adults = query.adults.unwrap_or(2).max(1);

        if config.tbo_configured() {
            match Self::search_via_tbo(pool, config, cache, &query, nights, rooms, adults).await {
                Ok(response) if !response.offers.is_empty() => return Ok(response),
                Ok(_) => {
                    log::info!(
                        "TBO returned no offers for '{}', serving local inventory",
                        query.city
                    );
                }
                Err(e) => {
                    log::warn!(
                        "TBO search failed for '{}' ({}), serving local inventory",
                        query.city,
                        e
                    );
                }
            }
        }

        Self::search_local(pool, config, &query, nights, rooms).await
    }

    async fn search_via_tbo(
        pool: &PgPool,
        config: &Config,
        cache: Arc<ResponseCache>,
        query: &HotelSearchQuery,
        nights: i64,
        rooms: i32,
        adults: i32,
    ) -> Result<HotelSearchResponse, TravelError> {
        let hotels = HotelRepository::find_tbo_hotels_by_city(pool, &query.city).await?;
        if hotels.is_empty() {
            // Nothing mapped to the supplier in this city
            return Ok(Self::empty_response(query, nights, "tbo"));
        }

        let codes: Vec<String> = hotels
            .iter()
            .filter_map(|h| h.tbo_hotel_code.clone())
            .collect();

        let client = TboClient::new_with_cache(
            config.tbo_base_url.clone(),
            config.tbo_client_id.clone(),
            config.tbo_api_key.clone(),
            cache,
        );
        let results = client
            .search_hotels(&codes, query.check_in, query.check_out, rooms, adults)
            .await?;

        let mut offers = Vec::new();
        for result in &results {
            let hotel = hotels
                .iter()
                .find(|h| h.tbo_hotel_code.as_deref() == Some(result.hotel_code.as_str()));
            let Some(hotel) = hotel else {
                log::warn!("TBO returned unmapped hotel code {}", result.hotel_code);
                continue;
            };

            // Cheapest room wins the offer slot
            let room = result.rooms.iter().min_by(|a, b| {
                a.total_fare
                    .partial_cmp(&b.total_fare)
                    .unwrap_or(Ordering::Equal)
            });
            let Some(room) = room else { continue };

            offers.push(HotelOfferResponse {
                hotel: hotel.to_response(),
                price_per_night: round2(room.total_fare / nights as f64),
                total_price: round2(room.total_fare),
                currency: result.currency.clone(),
                source: "tbo".to_string(),
                supplier_code: Some(room.booking_code.clone()),
            });
        }

        Ok(HotelSearchResponse {
            city: query.city.clone(),
            check_in: query.check_in,
            check_out: query.check_out,
            nights,
            offers,
            source: "tbo".to_string(),
        })
    }

    async fn search_local(
        pool: &PgPool,
        config: &Config,
        query: &HotelSearchQuery,
        nights: i64,
        rooms: i32,
    ) -> Result<HotelSearchResponse, TravelError> {
        let hotels = HotelRepository::search_by_city(pool, &query.city, rooms).await?;

        let offers = hotels
            .iter()
            .map(|hotel| HotelOfferResponse {
                hotel: hotel.to_response(),
                price_per_night: hotel.price_per_night,
                total_price: round2(hotel.price_per_night * nights as f64 * rooms as f64),
                currency: config.default_currency.clone(),
                source: "local".to_string(),
                supplier_code: None,
            })
            .collect();

        Ok(HotelSearchResponse {
            city: query.city.clone(),
            check_in: query.check_in,
            check_out: query.check_out,
            nights,
            offers,
            source: "local".to_string(),
        })
    }

    fn empty_response(query: &HotelSearchQuery, nights: i64, source: &str) -> HotelSearchResponse {
        HotelSearchResponse {
            city: query.city.clone(),
            check_in: query.check_in,
            check_out: query.check_out,
            nights,
            offers: Vec::new(),
            source: source.to_string(),
        }
    }

    async fn resolve(pool: &PgPool, identifier: &str) -> Result<Hotel, TravelError> {
        if let Ok(uuid) = Uuid::parse_str(identifier) {
            HotelRepository::get_by_id(pool, uuid).await
        } else {
            HotelRepository::get_by_slug(pool, identifier).await
        }
    }
}
