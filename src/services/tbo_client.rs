// src/services/tbo_client.rs
// DOCUMENTATION: TBO hotel API client
// PURPOSE: Handle communication with the TBO supplier for rates and bookings

use crate::errors::TravelError;
use crate::services::ResponseCache;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// TBO hotel API client
/// DOCUMENTATION: Handles authentication and API calls to TBO
/// All TBO endpoints are POST with a JSON body and basic auth
pub struct TboClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL for the TBO hotel API
    base_url: String,
    /// Account identifier, sent as the basic auth username
    client_id: String,
    /// API key, sent as the basic auth password
    api_key: String,
    /// Optional shared cache for search responses
    cache: Option<Arc<ResponseCache>>,
}

/// Status envelope every TBO response carries
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TboStatus {
    /// 200 success, 201 no availability, everything else is an error
    pub code: i32,
    pub description: String,
}

/// Occupancy of one requested room
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TboPaxRoom {
    adults: i32,
    children: i32,
    children_ages: Vec<i32>,
}

/// Request body for POST /Search
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TboSearchRequest {
    check_in: String,
    check_out: String,
    /// Comma-separated supplier hotel codes
    hotel_codes: String,
    guest_nationality: String,
    pax_rooms: Vec<TboPaxRoom>,
    response_time: i32,
    is_detailed_response: bool,
}

/// Response from POST /Search
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TboSearchResponse {
    pub status: TboStatus,
    pub hotel_result: Option<Vec<TboHotelResult>>,
}

/// One hotel's availability inside a search response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TboHotelResult {
    pub hotel_code: String,
    pub currency: String,
    #[serde(default)]
    pub rooms: Vec<TboRoom>,
}

/// One bookable room rate
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TboRoom {
    /// Room name lines as TBO sends them
    pub name: Option<Vec<String>>,
    /// Token the rate is booked with, valid for a short window
    pub booking_code: String,
    /// Whole-stay fare for this room
    pub total_fare: f64,
    pub total_tax: Option<f64>,
    #[serde(default)]
    pub is_refundable: bool,
    pub meal_type: Option<String>,
}

/// Request body for POST /PreBook
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TboPrebookRequest {
    booking_code: String,
    payment_mode: String,
}

/// Revalidated rate returned by PreBook
#[derive(Debug, Clone)]
pub struct TboPrebookResult {
    pub booking_code: String,
    /// Fare TBO will actually charge, may differ from the search fare
    pub total_fare: f64,
    pub currency: String,
}

/// One traveller name on a booking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TboCustomerName {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    /// "Adult" or "Child"
    #[serde(rename = "Type")]
    pub type_: String,
}

/// Travellers of one room
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TboCustomerDetail {
    pub customer_names: Vec<TboCustomerName>,
}

/// Request body for POST /Book
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TboBookRequest {
    pub booking_code: String,
    pub customer_details: Vec<TboCustomerDetail>,
    /// Our booking reference, echoed back by TBO
    pub client_reference_id: String,
    pub booking_reference_id: String,
    pub total_fare: f64,
    pub email_id: String,
    pub phone_number: String,
    pub booking_type: String,
    pub payment_mode: String,
}

/// Raw response from POST /Book
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TboBookResponse {
    status: TboStatus,
    confirmation_number: Option<String>,
    client_reference_id: Option<String>,
}

/// Confirmed supplier booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TboBookingConfirmation {
    pub confirmation_number: String,
    pub client_reference_id: Option<String>,
}

/// Raw response from POST /Cancel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TboCancelResponse {
    status: TboStatus,
    confirmation_number: Option<String>,
    refund_amount: Option<f64>,
}

/// Outcome of a supplier-side cancellation
#[derive(Debug, Clone, Serialize)]
pub struct TboCancelResult {
    pub confirmation_number: String,
    pub refund_amount: Option<f64>,
}

impl TboClient {
    /// Create new TBO API client
    /// DOCUMENTATION: Initializes client with account credentials
    pub fn new(base_url: String, client_id: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            client_id,
            api_key,
            cache: None,
        }
    }

    /// Create new TBO API client backed by a shared response cache
    /// Search responses are cached, booking calls never are
    pub fn new_with_cache(
        base_url: String,
        client_id: String,
        api_key: String,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            client_id,
            api_key,
            cache: Some(cache),
        }
    }

    /// Search availability for a set of supplier hotel codes
    /// DOCUMENTATION: Drives GET /hotels/search when TBO is configured
    ///
    /// # Arguments
    /// * `hotel_codes` - Supplier codes of the hotels to price
    /// * `check_in` / `check_out` - Stay window
    /// * `rooms` - Number of rooms wanted
    /// * `adults` - Adults per room
    ///
    /// # Returns
    /// Vector of per-hotel availability, empty when TBO has no rooms
    pub async fn search_hotels(
        &self,
        hotel_codes: &[String],
        check_in: NaiveDate,
        check_out: NaiveDate,
        rooms: i32,
        adults: i32,
    ) -> Result<Vec<TboHotelResult>, TravelError> {
        if hotel_codes.is_empty() {
            return Ok(Vec::new());
        }

        let codes = hotel_codes.join(",");
        let cache_key = ResponseCache::hotel_search_key(
            &codes,
            &check_in.to_string(),
            &check_out.to_string(),
            rooms,
            adults,
        );

        // Serve from cache when a fresh copy exists
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                if let Ok(results) = serde_json::from_str::<Vec<TboHotelResult>>(&cached) {
                    log::info!("TBO search served from cache ({} hotels)", results.len());
                    return Ok(results);
                }
            }
        }

        let body = TboSearchRequest {
            check_in: check_in.format("%Y-%m-%d").to_string(),
            check_out: check_out.format("%Y-%m-%d").to_string(),
            hotel_codes: codes,
            guest_nationality: "AE".to_string(),
            pax_rooms: (0..rooms.max(1))
                .map(|_| TboPaxRoom {
                    adults: adults.max(1),
                    children: 0,
                    children_ages: Vec::new(),
                })
                .collect(),
            response_time: 20,
            is_detailed_response: false,
        };

        log::debug!(
            "TBO search: {} hotels, {} to {}",
            hotel_codes.len(),
            check_in,
            check_out
        );

        let response: TboSearchResponse = self.post("Search", &body).await?;

        match response.status.code {
            200 => {
                let results = response.hotel_result.unwrap_or_default();
                log::info!("TBO search returned {} hotels", results.len());

                if let Some(cache) = &self.cache {
                    if let Ok(serialized) = serde_json::to_string(&results) {
                        cache.set(cache_key, serialized).await;
                    }
                }

                Ok(results)
            }
            // 201 means the search worked but nothing is on sale
            201 => {
                log::info!("TBO search: no availability ({})", response.status.description);
                Ok(Vec::new())
            }
            _ => Err(Self::status_error(&response.status, "search")),
        }
    }

    /// Revalidate a rate before booking it
    /// DOCUMENTATION: TBO fares can move between search and book, the
    /// prebooked fare is the one to charge
    pub async fn prebook(&self, booking_code: &str) -> Result<TboPrebookResult, TravelError> {
        let body = TboPrebookRequest {
            booking_code: booking_code.to_string(),
            payment_mode: "Limit".to_string(),
        };

        log::debug!("TBO prebook: {}", booking_code);

        let response: TboSearchResponse = self.post("PreBook", &body).await?;

        if response.status.code != 200 {
            return Err(Self::status_error(&response.status, "prebook"));
        }

        let hotel = response
            .hotel_result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                TravelError::ExternalApiError("PreBook returned no rate".to_string())
            })?;

        let room = hotel.rooms.into_iter().next().ok_or_else(|| {
            TravelError::ExternalApiError("PreBook returned no room".to_string())
        })?;

        Ok(TboPrebookResult {
            booking_code: room.booking_code,
            total_fare: room.total_fare,
            currency: hotel.currency,
        })
    }

    /// Confirm a booking with the supplier
    /// DOCUMENTATION: A 200 envelope carries the confirmation number
    pub async fn book(
        &self,
        request: &TboBookRequest,
    ) -> Result<TboBookingConfirmation, TravelError> {
        log::debug!(
            "TBO book: code={}, reference={}",
            request.booking_code,
            request.client_reference_id
        );

        let response: TboBookResponse = self.post("Book", request).await?;

        if response.status.code != 200 {
            return Err(Self::status_error(&response.status, "book"));
        }

        let confirmation_number = response.confirmation_number.ok_or_else(|| {
            TravelError::ExternalApiError("Book succeeded without a confirmation number".to_string())
        })?;

        log::info!(
            "TBO booking confirmed: {} (reference {})",
            confirmation_number,
            request.client_reference_id
        );

        Ok(TboBookingConfirmation {
            confirmation_number,
            client_reference_id: response.client_reference_id,
        })
    }

    /// Cancel a confirmed supplier booking
    pub async fn cancel_booking(
        &self,
        confirmation_number: &str,
    ) -> Result<TboCancelResult, TravelError> {
        let body = serde_json::json!({ "ConfirmationNumber": confirmation_number });

        log::debug!("TBO cancel: {}", confirmation_number);

        let response: TboCancelResponse = self.post("Cancel", &body).await?;

        if response.status.code != 200 {
            return Err(Self::status_error(&response.status, "cancel"));
        }

        log::info!("TBO booking cancelled: {}", confirmation_number);

        Ok(TboCancelResult {
            confirmation_number: response
                .confirmation_number
                .unwrap_or_else(|| confirmation_number.to_string()),
            refund_amount: response.refund_amount,
        })
    }

    /// POST a JSON body to one TBO endpoint and parse the reply
    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, TravelError>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("TBO {} request failed: {}", endpoint, e);
                TravelError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::error!("TBO {} HTTP error {}: {}", endpoint, status, text);
            return Err(TravelError::ExternalApiError(format!(
                "API error {}: {}",
                status, text
            )));
        }

        response.json::<R>().await.map_err(|e| {
            log::error!("Failed to parse TBO {} response: {}", endpoint, e);
            TravelError::ExternalApiError(format!("Parse error: {}", e))
        })
    }

    /// Map a non-200 envelope status to an error
    fn status_error(status: &TboStatus, context: &str) -> TravelError {
        match status.code {
            429 => {
                log::error!("TBO {} rate limited: {}", context, status.description);
                TravelError::RateLimitExceeded
            }
            401 | 403 => {
                log::error!("TBO {} denied: {}", context, status.description);
                TravelError::ExternalApiError(format!("Access denied: {}", status.description))
            }
            other => {
                log::error!(
                    "TBO {} unexpected status {}: {}",
                    context,
                    other,
                    status.description
                );
                TravelError::ExternalApiError(format!(
                    "Status {}: {}",
                    other, status.description
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_shape() {
        let body = TboSearchRequest {
            check_in: "2025-03-01".to_string(),
            check_out: "2025-03-05".to_string(),
            hotel_codes: "1001,1002".to_string(),
            guest_nationality: "AE".to_string(),
            pax_rooms: vec![TboPaxRoom {
                adults: 2,
                children: 0,
                children_ages: Vec::new(),
            }],
            response_time: 20,
            is_detailed_response: false,
        };

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["CheckIn"], "2025-03-01");
        assert_eq!(value["HotelCodes"], "1001,1002");
        assert_eq!(value["PaxRooms"][0]["Adults"], 2);
        assert_eq!(value["IsDetailedResponse"], false);
    }

    #[test]
    fn test_search_response_parsing() {
        let raw = r#"{
            "Status": { "Code": 200, "Description": "Successful" },
            "HotelResult": [
                {
                    "HotelCode": "1001",
                    "Currency": "USD",
                    "Rooms": [
                        {
                            "Name": ["Deluxe Room"],
                            "BookingCode": "abc!123",
                            "TotalFare": 412.5,
                            "TotalTax": 37.5,
                            "IsRefundable": true,
                            "MealType": "Room_Only"
                        }
                    ]
                }
            ]
        }"#;

        let parsed: TboSearchResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed.status.code, 200);
        let hotels = parsed.hotel_result.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].hotel_code, "1001");
        assert_eq!(hotels[0].rooms[0].booking_code, "abc!123");
        assert_eq!(hotels[0].rooms[0].total_fare, 412.5);
        assert!(hotels[0].rooms[0].is_refundable);
    }

    #[test]
    fn test_no_availability_parsing() {
        let raw = r#"{
            "Status": { "Code": 201, "Description": "No Available rooms for given criteria" }
        }"#;

        let parsed: TboSearchResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed.status.code, 201);
        assert!(parsed.hotel_result.is_none());
    }

    #[test]
    fn test_status_error_mapping() {
        let rate_limited = TboStatus {
            code: 429,
            description: "Too many requests".to_string(),
        };
        assert!(matches!(
            TboClient::status_error(&rate_limited, "search"),
            TravelError::RateLimitExceeded
        ));

        let denied = TboStatus {
            code: 401,
            description: "Invalid credentials".to_string(),
        };
        assert!(matches!(
            TboClient::status_error(&denied, "search"),
            TravelError::ExternalApiError(_)
        ));

        let unknown = TboStatus {
            code: 500,
            description: "Server error".to_string(),
        };
        assert!(matches!(
            TboClient::status_error(&unknown, "book"),
            TravelError::ExternalApiError(_)
        ));
    }

    #[test]
    fn test_book_request_shape() {
        let body = TboBookRequest {
            booking_code: "abc!123".to_string(),
            customer_details: vec![TboCustomerDetail {
                customer_names: vec![TboCustomerName {
                    title: "Mr".to_string(),
                    first_name: "Omar".to_string(),
                    last_name: "Hassan".to_string(),
                    type_: "Adult".to_string(),
                }],
            }],
            client_reference_id: "RHL-A1B2C3D4".to_string(),
            booking_reference_id: "RHL-A1B2C3D4".to_string(),
            total_fare: 412.5,
            email_id: "omar@example.com".to_string(),
            phone_number: "+971500000000".to_string(),
            booking_type: "Voucher".to_string(),
            payment_mode: "Limit".to_string(),
        };

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["BookingCode"], "abc!123");
        assert_eq!(value["ClientReferenceId"], "RHL-A1B2C3D4");
        assert_eq!(
            value["CustomerDetails"][0]["CustomerNames"][0]["Type"],
            "Adult"
        );
    }
}
