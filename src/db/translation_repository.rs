// src/db/translation_repository.rs
// DOCUMENTATION: Translation database operations
// PURPOSE: Locale string catalog storage with bulk upsert

use crate::errors::TravelError;
use crate::models::{Translation, TranslationUpsertItem};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TranslationRepository;

impl TranslationRepository {
    /// Fetch every string for a locale
    /// DOCUMENTATION: Used for GET /translations/{locale}
    pub async fn get_catalog(pool: &PgPool, locale: &str) -> Result<Vec<Translation>, TravelError> {
        sqlx::query_as::<_, Translation>(
            "SELECT * FROM translations WHERE locale = $1 ORDER BY key ASC",
        )
        .bind(locale)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch catalog for locale {}: {}", locale, e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Upsert a batch of strings for a locale
    /// Inserts new keys or overwrites existing values
    /// Returns (created, updated) counts
    pub async fn bulk_upsert(
        pool: &PgPool,
        locale: &str,
        entries: &[TranslationUpsertItem],
    ) -> Result<(i64, i64), TravelError> {
        let mut created = 0i64;
        let mut updated = 0i64;

        for entry in entries {
            // Try insert first - on conflict do nothing so we can detect creation
            let inserted = sqlx::query_as::<_, (Uuid,)>(
                r#"
                INSERT INTO translations (locale, key, value, created_at, updated_at)
                VALUES ($1, $2, $3, NOW(), NOW())
                ON CONFLICT (locale, key) DO NOTHING
                RETURNING id
                "#,
            )
            .bind(locale)
            .bind(&entry.key)
            .bind(&entry.value)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to upsert translation {}/{}: {}", locale, entry.key, e);
                TravelError::DatabaseError(e.to_string())
            })?;

            if inserted.is_some() {
                created += 1;
                continue;
            }

            // Update existing record
            sqlx::query(
                r#"
                UPDATE translations
                SET value = $3, updated_at = NOW()
                WHERE locale = $1 AND key = $2
                "#,
            )
            .bind(locale)
            .bind(&entry.key)
            .bind(&entry.value)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to update translation {}/{}: {}", locale, entry.key, e);
                TravelError::DatabaseError(e.to_string())
            })?;

            updated += 1;
        }

        log::info!(
            "Translation upsert for {}: {} created, {} updated",
            locale,
            created,
            updated
        );

        Ok((created, updated))
    }

    /// Delete one key from a locale catalog
    pub async fn delete_key(pool: &PgPool, locale: &str, key: &str) -> Result<(), TravelError> {
        let rows = sqlx::query("DELETE FROM translations WHERE locale = $1 AND key = $2")
            .bind(locale)
            .bind(key)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete translation {}/{}: {}", locale, key, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!(
                "Translation '{}/{}' not found",
                locale, key
            )));
        }

        log::info!("Deleted translation {}/{}", locale, key);
        Ok(())
    }
}
