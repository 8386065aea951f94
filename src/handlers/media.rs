// src/handlers/media.rs
// DOCUMENTATION: HTTP handlers for media asset registration
// PURPOSE: Assets live on a CDN, this API only tracks their URLs and
// which entity owns them

use crate::config::Config;
use crate::db::MediaRepository;
use crate::errors::TravelError;
use crate::models::{CreateMediaRequest, MediaListQuery, UpdateMediaRequest};
use crate::services::AuthService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Entity kinds media can attach to
const MEDIA_ENTITY_TYPES: [&str; 3] = ["package", "hotel", "destination"];

/// POST /media (staff only)
pub async fn create_media(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreateMediaRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    // Validate request
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }
    if !MEDIA_ENTITY_TYPES.contains(&req.entity_type.as_str()) {
        return Err(TravelError::InvalidInput(format!(
            "Unknown entity_type '{}', expected one of: {}",
            req.entity_type,
            MEDIA_ENTITY_TYPES.join(", ")
        )));
    }

    let media = MediaRepository::create_media(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(media.to_response()))
}

/// GET /media
/// List assets, optionally scoped to one entity
pub async fn list_media(
    pool: web::Data<PgPool>,
    query: web::Query<MediaListQuery>,
) -> Result<impl Responder, TravelError> {
    let media = MediaRepository::list(
        pool.get_ref(),
        query.entity_type.as_deref(),
        query.entity_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(media.iter().map(|m| m.to_response()).collect::<Vec<_>>()))
}

/// GET /media/{id}
pub async fn get_media(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let media = MediaRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(media.to_response()))
}

/// PUT /media/{id} (staff only)
pub async fn update_media(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateMediaRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let media = MediaRepository::update_media(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(media.to_response()))
}

/// DELETE /media/{id} (staff only)
pub async fn delete_media(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    MediaRepository::delete_media(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for media routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/media")
            .route("", web::post().to(create_media))
            .route("", web::get().to(list_media))
            .route("/{id}", web::get().to(get_media))
            .route("/{id}", web::put().to(update_media))
            .route("/{id}", web::delete().to(delete_media)),
    );
}
