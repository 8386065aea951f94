// src/handlers/destinations.rs
// DOCUMENTATION: HTTP handlers for destination operations
// PURPOSE: Parse requests, call the repository, return responses

use crate::config::Config;
use crate::db::DestinationRepository;
use crate::errors::TravelError;
use crate::models::{CreateDestinationRequest, DestinationListQuery, UpdateDestinationRequest};
use crate::services::{slug, AuthService};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /destinations
pub async fn list_destinations(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<DestinationListQuery>,
) -> Result<impl Responder, TravelError> {
    let include_inactive = if query.include_inactive.unwrap_or(false) {
        let auth = AuthService::authenticate(&http, config.get_ref())?;
        auth.require_staff()?;
        true
    } else {
        false
    };

    let destinations =
        DestinationRepository::list(pool.get_ref(), query.featured, include_inactive).await?;
    Ok(HttpResponse::Ok().json(
        destinations
            .iter()
            .map(|d| d.to_response())
            .collect::<Vec<_>>(),
    ))
}

/// GET /destinations/{id}
pub async fn get_destination(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let destination = DestinationRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(destination.to_response()))
}

/// POST /destinations (staff only)
pub async fn create_destination(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreateDestinationRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let pool = pool.get_ref();
    let slug = slug::find_available_slug(&req.name_en, |candidate| async move {
        DestinationRepository::slug_exists(pool, &candidate).await
    })
    .await?;

    let destination = DestinationRepository::create(pool, &slug, &req).await?;
    Ok(HttpResponse::Created().json(destination.to_response()))
}

/// PUT /destinations/{id} (staff only)
pub async fn update_destination(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateDestinationRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let pool = pool.get_ref();
    let id = path.into_inner();

    let new_slug = match &req.name_en {
        Some(name) => {
            let existing = DestinationRepository::get_by_id(pool, id).await?;
            if slug::slugify(name) == existing.slug {
                None
            } else {
                Some(
                    slug::find_available_slug(name, |candidate| async move {
                        DestinationRepository::slug_exists(pool, &candidate).await
                    })
                    .await?,
                )
            }
        }
        None => None,
    };

    let destination = DestinationRepository::update(pool, id, &req, new_slug.as_deref()).await?;
    Ok(HttpResponse::Ok().json(destination.to_response()))
}

/// DELETE /destinations/{id} (admin only)
pub async fn delete_destination(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_admin()?;

    DestinationRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for destination routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/destinations")
            .route("", web::get().to(list_destinations))
            .route("", web::post().to(create_destination))
            .route("/{id}", web::get().to(get_destination))
            .route("/{id}", web::put().to(update_destination))
            .route("/{id}", web::delete().to(delete_destination)),
    );
}
