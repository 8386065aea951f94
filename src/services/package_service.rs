// src/services/package_service.rs
// DOCUMENTATION: Business logic for travel packages
// PURPOSE: Intermediary between handlers and repository, owns slug handling

use crate::config::Config;
use crate::db::{HotelRepository, MediaRepository, PackageRepository};
use crate::errors::TravelError;
use crate::models::{
    CreatePackageRequest, PackageDetailResponse, PackageListQuery, PackageListResponse,
    PackageResponse, UpdatePackageRequest,
};
use crate::services::slug;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PackageService;

impl PackageService {
    /// Create a new package with a slug derived from the English title
    pub async fn create_package(
        pool: &PgPool,
        config: &Config,
        req: CreatePackageRequest,
    ) -> Result<PackageResponse, TravelError> {
        if let Some(sale) = req.sale_price {
            if sale < 0.0 {
                return Err(TravelError::ValidationError(
                    "sale_price cannot be negative".to_string(),
                ));
            }
        }

        let slug = slug::find_available_slug(&req.title_en, |candidate| async move {
            PackageRepository::slug_exists(pool, &candidate).await
        })
        .await?;

        let package =
            PackageRepository::create_package(pool, &slug, &req, &config.default_currency).await?;
        Ok(package.to_response())
    }

    /// Get a package by ID (UUID or slug)
    /// DOCUMENTATION: Returns the package with its hotel and gallery
    pub async fn get_by_id_or_slug(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<PackageDetailResponse, TravelError> {
        // Try to parse as UUID first
        let package = if let Ok(uuid) = Uuid::parse_str(identifier) {
            PackageRepository::get_by_id(pool, uuid).await?
        } else {
            // If not a UUID, treat as slug
            PackageRepository::get_by_slug(pool, identifier).await?
        };

        let hotel = match package.hotel_id {
            Some(hotel_id) => Some(HotelRepository::get_by_id(pool, hotel_id).await?.to_response()),
            None => None,
        };

        let media = MediaRepository::list_for_entity(pool, "package", package.id).await?;

        Ok(PackageDetailResponse {
            package: package.to_response(),
            hotel,
            media: media.into_iter().map(|m| m.to_response()).collect(),
        })
    }

    /// Search packages
    /// allow_unpublished lets staff browse drafts
    pub async fn search(
        pool: &PgPool,
        query: PackageListQuery,
        allow_unpublished: bool,
    ) -> Result<PackageListResponse, TravelError> {
        let (packages, total_count) =
            PackageRepository::search(pool, &query, allow_unpublished).await?;

        // Calculate pagination metadata
        let limit = query.limit.unwrap_or(20).max(1);
        let page = query.page.unwrap_or(1).max(1);
        let has_more = total_count > (page * limit);

        Ok(PackageListResponse {
            data: packages.iter().map(|p| p.to_response()).collect(),
            total_count,
            page,
            limit,
            has_more,
        })
    }

    /// Featured published packages for the landing page
    pub async fn list_featured(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<PackageResponse>, TravelError> {
        let packages = PackageRepository::list_featured(pool, limit).await?;
        Ok(packages.iter().map(|p| p.to_response()).collect())
    }

    /// Update a package
    /// DOCUMENTATION: A changed English title regenerates the slug, a
    /// title that slugs to the current value keeps it
    pub async fn update_package(
        pool: &PgPool,
        id: Uuid,
        req: UpdatePackageRequest,
    ) -> Result<PackageResponse, TravelError> {
        let new_slug = match &req.title_en {
            Some(title) => {
                let existing = PackageRepository::get_by_id(pool, id).await?;
                if slug::slugify(title) == existing.slug {
                    None
                } else {
                    let regenerated =
                        slug::find_available_slug(title, |candidate| async move {
                            PackageRepository::slug_exists(pool, &candidate).await
                        })
                        .await?;
                    log::info!("Package {} slug regenerated to '{}'", id, regenerated);
                    Some(regenerated)
                }
            }
            None => None,
        };

        let package =
            PackageRepository::update_package(pool, id, &req, new_slug.as_deref()).await?;
        Ok(package.to_response())
    }

    /// Delete a package
    pub async fn delete_package(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        PackageRepository::delete_package(pool, id).await
    }
}
