// src/handlers/translations.rs
// DOCUMENTATION: HTTP handlers for UI translation catalogs
// PURPOSE: Serve flat key/value maps per locale and let staff edit them

use crate::config::Config;
use crate::db::TranslationRepository;
use crate::errors::TravelError;
use crate::models::{BulkUpsertRequest, BulkUpsertResponse};
use crate::services::AuthService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Locales the platform ships content for
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "ar"];

fn check_locale(locale: &str) -> Result<(), TravelError> {
    if SUPPORTED_LOCALES.contains(&locale) {
        Ok(())
    } else {
        Err(TravelError::InvalidInput(format!(
            "Unsupported locale '{}', expected one of: {}",
            locale,
            SUPPORTED_LOCALES.join(", ")
        )))
    }
}

/// GET /translations/{locale}
/// Whole catalog as a flat map, the shape frontend i18n loaders expect
pub async fn get_catalog(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let locale = path.into_inner();
    check_locale(&locale)?;

    let rows = TranslationRepository::get_catalog(pool.get_ref(), &locale).await?;

    let mut catalog = serde_json::Map::new();
    for row in rows {
        catalog.insert(row.key, serde_json::Value::String(row.value));
    }

    Ok(HttpResponse::Ok().json(catalog))
}

/// PUT /translations/{locale}
/// Bulk upsert catalog entries (staff only)
pub async fn upsert_catalog(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<String>,
    req: web::Json<BulkUpsertRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let locale = path.into_inner();
    check_locale(&locale)?;

    // Validate request
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }
    if req.entries.is_empty() {
        return Err(TravelError::InvalidInput(
            "entries must not be empty".to_string(),
        ));
    }

    let (created, updated) =
        TranslationRepository::bulk_upsert(pool.get_ref(), &locale, &req.entries).await?;

    Ok(HttpResponse::Ok().json(BulkUpsertResponse {
        locale,
        created,
        updated,
    }))
}

/// DELETE /translations/{locale}/{key}
/// Remove one catalog entry (staff only)
pub async fn delete_key(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let (locale, key) = path.into_inner();
    check_locale(&locale)?;

    TranslationRepository::delete_key(pool.get_ref(), &locale, &key).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for translation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/translations")
            .route("/{locale}", web::get().to(get_catalog))
            .route("/{locale}", web::put().to(upsert_catalog))
            .route("/{locale}/{key}", web::delete().to(delete_key)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_locales() {
        assert!(check_locale("en").is_ok());
        assert!(check_locale("ar").is_ok());
    }

    #[test]
    fn test_unknown_locale_refused() {
        assert!(check_locale("fr").is_err());
        assert!(check_locale("").is_err());
        assert!(check_locale("EN").is_err());
    }
}
