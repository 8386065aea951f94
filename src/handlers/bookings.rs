// src/handlers/bookings.rs
// DOCUMENTATION: HTTP handlers for booking operations
// PURPOSE: Parse requests, resolve the caller, hand off to the booking service

use crate::config::Config;
use crate::errors::TravelError;
use crate::models::{BookingListQuery, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::services::{AuthService, BookingService};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// POST /bookings
/// Create a booking for the authenticated account
pub async fn create_booking(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreateBookingRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;

    // Validate request
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let booking =
        BookingService::create_booking(pool.get_ref(), config.get_ref(), &auth, &req).await?;
    Ok(HttpResponse::Created().json(booking))
}

/// GET /bookings
/// List bookings, staff see all accounts, customers their own
pub async fn list_bookings(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<BookingListQuery>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;

    let result = BookingService::list_bookings(pool.get_ref(), &auth, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /bookings/mine
/// Bookings of the authenticated account only
pub async fn my_bookings(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<BookingListQuery>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;

    let result = BookingService::my_bookings(pool.get_ref(), &auth, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /bookings/{id}
/// Retrieve a booking by ID (UUID or reference), owner or staff
pub async fn get_booking(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;

    let identifier = path.into_inner();
    let booking = BookingService::get_booking(pool.get_ref(), &auth, &identifier).await?;
    Ok(HttpResponse::Ok().json(booking))
}

/// PUT /bookings/{id}/status
/// Move a booking through its lifecycle (staff only)
pub async fn update_booking_status(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateBookingStatusRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let booking = BookingService::update_status(
        pool.get_ref(),
        config.get_ref(),
        &auth,
        path.into_inner(),
        &req.status,
    )
    .await?;
    Ok(HttpResponse::Ok().json(booking))
}

/// POST /bookings/{id}/cancel
/// Cancel a booking, owner or staff
pub async fn cancel_booking(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;

    let booking = BookingService::cancel_booking(
        pool.get_ref(),
        config.get_ref(),
        &auth,
        path.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(booking))
}

/// Configuration for booking routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(create_booking))
            .route("", web::get().to(list_bookings))
            .route("/mine", web::get().to(my_bookings))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}/status", web::put().to(update_booking_status))
            .route("/{id}/cancel", web::post().to(cancel_booking)),
    );
}
