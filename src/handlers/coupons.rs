// src/handlers/coupons.rs
// DOCUMENTATION: HTTP handlers for coupon management and validation
// PURPOSE: Staff manage codes, customers check a code against an order

use crate::config::Config;
use crate::db::CouponRepository;
use crate::errors::TravelError;
use crate::models::{
    CouponValidateRequest, CouponValidateResponse, CreateCouponRequest, UpdateCouponRequest,
};
use crate::services::{AuthService, PricingService};
use crate::services::pricing::round2;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /coupons (staff only)
pub async fn list_coupons(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let coupons = CouponRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(coupons.iter().map(|c| c.to_response()).collect::<Vec<_>>()))
}

/// GET /coupons/{id} (staff only)
pub async fn get_coupon(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let coupon = CouponRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(coupon.to_response()))
}

/// POST /coupons (staff only)
pub async fn create_coupon(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreateCouponRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    // Validate request
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let coupon = CouponRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(coupon.to_response()))
}

/// PUT /coupons/{id} (staff only)
pub async fn update_coupon(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCouponRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let coupon = CouponRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(coupon.to_response()))
}

/// DELETE /coupons/{id} (admin only)
pub async fn delete_coupon(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_admin()?;

    CouponRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /coupons/validate
/// Check a code against an order amount before checkout
/// DOCUMENTATION: Refusals come back as valid=false with a reason, not
/// as an error status, so the storefront can render them inline
pub async fn validate_coupon(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CouponValidateRequest>,
) -> Result<impl Responder, TravelError> {
    AuthService::authenticate(&http, config.get_ref())?;

    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let code = req.code.trim().to_uppercase();

    let coupon = match CouponRepository::find_by_code(pool.get_ref(), &code).await? {
        Some(coupon) => coupon,
        None => {
            return Ok(HttpResponse::Ok().json(CouponValidateResponse {
                code,
                valid: false,
                reason: Some("Coupon not found".to_string()),
                discount_amount: None,
                final_amount: None,
            }));
        }
    };

    let response = match PricingService::check_coupon(&coupon, req.order_amount) {
        Ok(()) => {
            let discount = PricingService::discount_for(&coupon, req.order_amount);
            CouponValidateResponse {
                code: coupon.code.clone(),
                valid: true,
                reason: None,
                discount_amount: Some(discount),
                final_amount: Some(round2(req.order_amount - discount)),
            }
        }
        Err(reason) => CouponValidateResponse {
            code: coupon.code.clone(),
            valid: false,
            reason: Some(reason),
            discount_amount: None,
            final_amount: None,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configuration for coupon routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/coupons")
            .route("", web::get().to(list_coupons))
            .route("", web::post().to(create_coupon))
            .route("/validate", web::post().to(validate_coupon))
            .route("/{id}", web::get().to(get_coupon))
            .route("/{id}", web::put().to(update_coupon))
            .route("/{id}", web::delete().to(delete_coupon)),
    );
}
