// src/handlers/packages.rs
// DOCUMENTATION: HTTP handlers for travel package operations
// PURPOSE: Parse requests, call services, return responses

use crate::config::Config;
use crate::errors::TravelError;
use crate::models::{CreatePackageRequest, PackageListQuery, UpdatePackageRequest};
use crate::services::{AuthService, PackageService};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// POST /packages
/// Create a new package (staff only)
pub async fn create_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreatePackageRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    // Validate request
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let package =
        PackageService::create_package(pool.get_ref(), config.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(package))
}

/// GET /packages
/// Search published packages, staff can include drafts
pub async fn list_packages(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<PackageListQuery>,
) -> Result<impl Responder, TravelError> {
    // Drafts stay hidden unless a staff token asks for them
    let allow_unpublished = if query.include_unpublished.unwrap_or(false) {
        let auth = AuthService::authenticate(&http, config.get_ref())?;
        auth.require_staff()?;
        true
    } else {
        false
    };

    let result =
        PackageService::search(pool.get_ref(), query.into_inner(), allow_unpublished).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /packages/featured
/// Featured packages for the landing page
pub async fn featured_packages(
    pool: web::Data<PgPool>,
) -> Result<impl Responder, TravelError> {
    let packages = PackageService::list_featured(pool.get_ref(), 10).await?;
    Ok(HttpResponse::Ok().json(packages))
}

/// GET /packages/{id}
/// Retrieve a package by ID (UUID or slug) with hotel and gallery
pub async fn get_package(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let identifier = path.into_inner();
    let detail = PackageService::get_by_id_or_slug(pool.get_ref(), &identifier).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// PUT /packages/{id}
/// Update a package (staff only)
pub async fn update_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePackageRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let package =
        PackageService::update_package(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(package))
}

/// DELETE /packages/{id}
/// Delete a package (admin only)
pub async fn delete_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_admin()?;

    PackageService::delete_package(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for package routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/packages")
            .route("", web::post().to(create_package))
            .route("", web::get().to(list_packages))
            .route("/featured", web::get().to(featured_packages))
            .route("/{id}", web::get().to(get_package))
            .route("/{id}", web::put().to(update_package))
            .route("/{id}", web::delete().to(delete_package)),
    );
}
