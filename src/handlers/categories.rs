// src/handlers/categories.rs
// DOCUMENTATION: HTTP handlers for the two category taxonomies
// PURPOSE: Package categories and activity categories share one shape,
// so both scopes live here

use crate::config::Config;
use crate::db::{ActivityCategoryRepository, CategoryRepository};
use crate::errors::TravelError;
use crate::models::{CategoryListQuery, CreateCategoryRequest, UpdateCategoryRequest};
use crate::services::{slug, AuthService};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /categories
pub async fn list_categories(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<CategoryListQuery>,
) -> Result<impl Responder, TravelError> {
    let include_inactive = if query.include_inactive.unwrap_or(false) {
        let auth = AuthService::authenticate(&http, config.get_ref())?;
        auth.require_staff()?;
        true
    } else {
        false
    };

    let categories = CategoryRepository::list(pool.get_ref(), include_inactive).await?;
    Ok(HttpResponse::Ok().json(
        categories
            .iter()
            .map(|c| c.to_response())
            .collect::<Vec<_>>(),
    ))
}

/// GET /categories/{id}
pub async fn get_category(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let category = CategoryRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category.to_response()))
}

/// POST /categories (staff only)
pub async fn create_category(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreateCategoryRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let pool = pool.get_ref();
    let slug = slug::find_available_slug(&req.name_en, |candidate| async move {
        CategoryRepository::slug_exists(pool, &candidate).await
    })
    .await?;

    let category = CategoryRepository::create(pool, &slug, &req).await?;
    Ok(HttpResponse::Created().json(category.to_response()))
}

/// PUT /categories/{id} (staff only)
pub async fn update_category(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCategoryRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let pool = pool.get_ref();
    let id = path.into_inner();

    let new_slug = match &req.name_en {
        Some(name) => {
            let existing = CategoryRepository::get_by_id(pool, id).await?;
            if slug::slugify(name) == existing.slug {
                None
            } else {
                Some(
                    slug::find_available_slug(name, |candidate| async move {
                        CategoryRepository::slug_exists(pool, &candidate).await
                    })
                    .await?,
                )
            }
        }
        None => None,
    };

    let category = CategoryRepository::update(pool, id, &req, new_slug.as_deref()).await?;
    Ok(HttpResponse::Ok().json(category.to_response()))
}

/// DELETE /categories/{id} (admin only)
pub async fn delete_category(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_admin()?;

    CategoryRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /activity-categories
pub async fn list_activity_categories(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<CategoryListQuery>,
) -> Result<impl Responder, TravelError> {
    let include_inactive = if query.include_inactive.unwrap_or(false) {
        let auth = AuthService::authenticate(&http, config.get_ref())?;
        auth.require_staff()?;
        true
    } else {
        false
    };

    let categories = ActivityCategoryRepository::list(pool.get_ref(), include_inactive).await?;
    Ok(HttpResponse::Ok().json(
        categories
            .iter()
            .map(|c| c.to_response())
            .collect::<Vec<_>>(),
    ))
}

/// GET /activity-categories/{id}
pub async fn get_activity_category(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let category =
        ActivityCategoryRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category.to_response()))
}

/// POST /activity-categories (staff only)
pub async fn create_activity_category(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<CreateCategoryRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let pool = pool.get_ref();
    let slug = slug::find_available_slug(&req.name_en, |candidate| async move {
        ActivityCategoryRepository::slug_exists(pool, &candidate).await
    })
    .await?;

    let category = ActivityCategoryRepository::create(pool, &slug, &req).await?;
    Ok(HttpResponse::Created().json(category.to_response()))
}

/// PUT /activity-categories/{id} (staff only)
pub async fn update_activity_category(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCategoryRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let pool = pool.get_ref();
    let id = path.into_inner();

    let new_slug = match &req.name_en {
        Some(name) => {
            let existing = ActivityCategoryRepository::get_by_id(pool, id).await?;
            if slug::slugify(name) == existing.slug {
                None
            } else {
                Some(
                    slug::find_available_slug(name, |candidate| async move {
                        ActivityCategoryRepository::slug_exists(pool, &candidate).await
                    })
                    .await?,
                )
            }
        }
        None => None,
    };

    let category =
        ActivityCategoryRepository::update(pool, id, &req, new_slug.as_deref()).await?;
    Ok(HttpResponse::Ok().json(category.to_response()))
}

/// DELETE /activity-categories/{id} (admin only)
pub async fn delete_activity_category(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_admin()?;

    ActivityCategoryRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for both taxonomy scopes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
    cfg.service(
        web::scope("/activity-categories")
            .route("", web::get().to(list_activity_categories))
            .route("", web::post().to(create_activity_category))
            .route("/{id}", web::get().to(get_activity_category))
            .route("/{id}", web::put().to(update_activity_category))
            .route("/{id}", web::delete().to(delete_activity_category)),
    );
}
