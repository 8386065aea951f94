// src/handlers/hotels.rs
// DOCUMENTATION: HTTP handlers for hotel operations
// PURPOSE: Parse requests, call services, return responses

use crate::config::Config;
use crate::errors::TravelError;
use crate::models::{CreateHotelRequest, HotelListQuery, HotelSearchQuery, UpdateHotelRequest};
use crate::services::{AuthService, HotelService, ResponseCache};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// POST /hotels
/// Create a new hotel (staff only)
pub async fn create_hotel(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreateHotelRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    // Validate request
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let hotel = HotelService::create_hotel(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(hotel))
}

/// GET /hotels
/// List hotels, staff can include inactive ones
pub async fn list_hotels(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<HotelListQuery>,
) -> Result<impl Responder, TravelError> {
    let allow_inactive = if query.include_inactive.unwrap_or(false) {
        let auth = AuthService::authenticate(&http, config.get_ref())?;
        auth.require_staff()?;
        true
    } else {
        false
    };

    let result = HotelService::list(pool.get_ref(), query.into_inner(), allow_inactive).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /hotels/search
/// Search a city for a stay window (TBO with local fallback)
pub async fn search_hotels(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<Arc<ResponseCache>>,
    query: web::Query<HotelSearchQuery>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = query.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let result = HotelService::search(
        pool.get_ref(),
        config.get_ref(),
        cache.get_ref().clone(),
        query.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /hotels/{id}
/// Retrieve a hotel by ID (UUID or slug)
pub async fn get_hotel(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let identifier = path.into_inner();
    let hotel = HotelService::get_by_id_or_slug(pool.get_ref(), &identifier).await?;
    Ok(HttpResponse::Ok().json(hotel))
}

/// GET /hotels/{id}/availability
/// Room availability snapshot
pub async fn hotel_availability(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let identifier = path.into_inner();
    let availability = HotelService::availability(pool.get_ref(), &identifier).await?;
    Ok(HttpResponse::Ok().json(availability))
}

/// PUT /hotels/{id}
/// Update a hotel (staff only)
pub async fn update_hotel(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateHotelRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let hotel =
        HotelService::update_hotel(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(hotel))
}

/// DELETE /hotels/{id}
/// Deactivate a hotel (admin only)
pub async fn delete_hotel(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_admin()?;

    HotelService::delete_hotel(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for hotel routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/hotels")
            .route("", web::post().to(create_hotel))
            .route("", web::get().to(list_hotels))
            .route("/search", web::get().to(search_hotels))
            .route("/{id}", web::get().to(get_hotel))
            .route("/{id}/availability", web::get().to(hotel_availability))
            .route("/{id}", web::put().to(update_hotel))
            .route("/{id}", web::delete().to(delete_hotel)),
    );
}
