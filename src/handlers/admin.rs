// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for dashboard and operational statistics
// PURPOSE: Expose platform counters, revenue aggregates and cache controls

use crate::config::Config;
use crate::errors::TravelError;
use crate::services::{AuthService, ResponseCache, StatsService};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

/// GET /admin/dashboard
/// Cached dashboard snapshot (staff only)
///
/// DOCUMENTATION: Served straight from the response cache within the
/// TTL window, recomputed on a miss
pub async fn dashboard(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<Arc<ResponseCache>>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&req, &config)?;
    auth.require_staff()?;

    let body = StatsService::dashboard(pool.get_ref(), cache.get_ref()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// GET /admin/stats
/// Get detailed database statistics
///
/// DOCUMENTATION: Always computed fresh, unlike the dashboard snapshot
pub async fn database_stats(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&req, &config)?;
    auth.require_staff()?;

    // Query revenue per currency
    #[derive(Debug, Serialize, sqlx::FromRow)]
    struct CurrencyRevenue {
        currency: Option<String>,
        count: Option<i64>,
        revenue: Option<f64>,
    }

    let revenue_by_currency: Vec<CurrencyRevenue> = sqlx::query_as(
        "SELECT currency, COUNT(*) as count, SUM(total_amount) as revenue \
         FROM bookings WHERE status <> 'cancelled' GROUP BY currency ORDER BY revenue DESC",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    // Query package counts per destination
    #[derive(Debug, Serialize, sqlx::FromRow)]
    struct DestinationCount {
        name_en: Option<String>,
        count: Option<i64>,
    }

    let packages_by_destination: Vec<DestinationCount> = sqlx::query_as(
        "SELECT d.name_en, COUNT(p.id) as count FROM packages p \
         JOIN destinations d ON d.id = p.destination_id \
         WHERE p.is_published = true GROUP BY d.name_en ORDER BY count DESC LIMIT 10",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    // Query most redeemed coupons
    #[derive(Debug, Serialize, sqlx::FromRow)]
    struct CouponUsage {
        code: Option<String>,
        used_count: Option<i32>,
    }

    let coupon_usage: Vec<CouponUsage> = sqlx::query_as(
        "SELECT code, used_count FROM coupons WHERE used_count > 0 \
         ORDER BY used_count DESC LIMIT 10",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    // Query average booking value
    let avg_booking_value: (Option<f64>,) = sqlx::query_as(
        "SELECT AVG(total_amount) FROM bookings WHERE status <> 'cancelled'",
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "revenue_by_currency": revenue_by_currency,
        "packages_by_destination": packages_by_destination,
        "coupon_usage": coupon_usage,
        "average_booking_value": avg_booking_value.0,
    })))
}

/// GET /admin/cache/stats
/// Response cache entry counts (staff only)
pub async fn cache_stats(
    config: web::Data<Config>,
    cache: web::Data<Arc<ResponseCache>>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&req, &config)?;
    auth.require_staff()?;

    let stats = cache.stats().await;
    Ok(HttpResponse::Ok().json(stats))
}

/// POST /admin/cache/clear
/// Drop every cached response (admin only)
pub async fn cache_clear(
    config: web::Data<Config>,
    cache: web::Data<Arc<ResponseCache>>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&req, &config)?;
    auth.require_admin()?;

    cache.clear().await;

    log::info!("Response cache cleared by admin {}", auth.id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Cache cleared"
    })))
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/dashboard", web::get().to(dashboard))
            .route("/stats", web::get().to(database_stats))
            .route("/cache/stats", web::get().to(cache_stats))
            .route("/cache/clear", web::post().to(cache_clear)),
    );
}
