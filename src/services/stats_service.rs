// src/services/stats_service.rs
// DOCUMENTATION: Aggregated platform statistics for the admin dashboard
// PURPOSE: One cached snapshot per TTL window instead of a fan-out of
// COUNT queries on every dashboard load

use crate::errors::TravelError;
use crate::services::cache::ResponseCache;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Booking counts per lifecycle status
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Most booked packages, cancelled bookings excluded
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopPackage {
    pub package_id: Uuid,
    pub title_en: String,
    pub bookings: i64,
}

/// Snapshot served on GET /admin/dashboard
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub new_users_30d: i64,
    pub total_packages: i64,
    pub published_packages: i64,
    pub active_hotels: i64,
    pub total_bookings: i64,
    pub bookings_24h: i64,
    pub bookings_by_status: Vec<StatusCount>,
    pub revenue_total: f64,
    pub revenue_30d: f64,
    pub top_packages: Vec<TopPackage>,
    pub generated_at: DateTime<Utc>,
}

pub struct StatsService;

impl StatsService {
    /// Dashboard snapshot, served from cache within the TTL window
    /// DOCUMENTATION: Returns the serialized body so cached and fresh
    /// loads flow through the same path
    pub async fn dashboard(pool: &PgPool, cache: &ResponseCache) -> Result<String, TravelError> {
        let key = ResponseCache::dashboard_key();

        if let Some(cached) = cache.get(&key).await {
            log::debug!("Dashboard served from cache");
            return Ok(cached);
        }

        let stats = Self::collect(pool).await?;
        let serialized = serde_json::to_string(&stats).map_err(|e| {
            TravelError::InternalError(format!("Could not serialize dashboard: {}", e))
        })?;

        cache.set(key, serialized.clone()).await;
        Ok(serialized)
    }

    /// Drop the cached snapshot so the next load recomputes
    pub async fn invalidate_dashboard(cache: &ResponseCache) {
        cache.invalidate(&ResponseCache::dashboard_key()).await;
    }

    async fn collect(pool: &PgPool) -> Result<DashboardStats, TravelError> {
        let total_users =
            Self::count(pool, "SELECT COUNT(*) FROM users WHERE is_active = true").await?;
        let new_users_30d = Self::count(
            pool,
            "SELECT COUNT(*) FROM users WHERE created_at > NOW() - INTERVAL '30 days'",
        )
        .await?;
        let total_packages = Self::count(pool, "SELECT COUNT(*) FROM packages").await?;
        let published_packages = Self::count(
            pool,
            "SELECT COUNT(*) FROM packages WHERE is_published = true",
        )
        .await?;
        let active_hotels =
            Self::count(pool, "SELECT COUNT(*) FROM hotels WHERE is_active = true").await?;
        let total_bookings = Self::count(pool, "SELECT COUNT(*) FROM bookings").await?;
        let bookings_24h = Self::count(
            pool,
            "SELECT COUNT(*) FROM bookings WHERE created_at > NOW() - INTERVAL '24 hours'",
        )
        .await?;

        let bookings_by_status = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) as count
            FROM bookings
            GROUP BY status
            ORDER BY count DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Bookings by status query failed: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let revenue_total = Self::sum(
            pool,
            "SELECT COALESCE(SUM(total_amount), 0) FROM bookings WHERE status <> 'cancelled'",
        )
        .await?;
        let revenue_30d = Self::sum(
            pool,
            "SELECT COALESCE(SUM(total_amount), 0) FROM bookings \
             WHERE status <> 'cancelled' AND created_at > NOW() - INTERVAL '30 days'",
        )
        .await?;

        let top_packages = sqlx::query_as::<_, TopPackage>(
            r#"
            SELECT p.id as package_id, p.title_en, COUNT(b.id) as bookings
            FROM bookings b
            JOIN packages p ON p.id = b.package_id
            WHERE b.status <> 'cancelled'
            GROUP BY p.id, p.title_en
            ORDER BY bookings DESC
            LIMIT 5
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Top packages query failed: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        Ok(DashboardStats {
            total_users,
            new_users_30d,
            total_packages,
            published_packages,
            active_hotels,
            total_bookings,
            bookings_24h,
            bookings_by_status,
            revenue_total,
            revenue_30d,
            top_packages,
            generated_at: Utc::now(),
        })
    }

    async fn count(pool: &PgPool, sql: &str) -> Result<i64, TravelError> {
        let row: (i64,) = sqlx::query_as(sql).fetch_one(pool).await.map_err(|e| {
            log::error!("Count query failed: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;
        Ok(row.0)
    }

    async fn sum(pool: &PgPool, sql: &str) -> Result<f64, TravelError> {
        let row: (f64,) = sqlx::query_as(sql).fetch_one(pool).await.map_err(|e| {
            log::error!("Sum query failed: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> DashboardStats {
        DashboardStats {
            total_users: 42,
            new_users_30d: 7,
            total_packages: 12,
            published_packages: 9,
            active_hotels: 5,
            total_bookings: 100,
            bookings_24h: 3,
            bookings_by_status: vec![
                StatusCount {
                    status: "confirmed".to_string(),
                    count: 80,
                },
                StatusCount {
                    status: "pending".to_string(),
                    count: 20,
                },
            ],
            revenue_total: 125000.50,
            revenue_30d: 8200.0,
            top_packages: vec![TopPackage {
                package_id: Uuid::new_v4(),
                title_en: "Desert Escape".to_string(),
                bookings: 31,
            }],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_dashboard_snapshot_serializes() {
        let stats = sample_stats();
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["total_users"], 42);
        assert_eq!(json["bookings_by_status"][0]["status"], "confirmed");
        assert_eq!(json["top_packages"][0]["title_en"], "Desert Escape");
        assert_eq!(json["revenue_total"], 125000.50);
    }

    #[test]
    fn test_dashboard_snapshot_round_trips() {
        // The cache stores the serialized form, so it must parse back
        let stats = sample_stats();
        let serialized = serde_json::to_string(&stats).unwrap();
        let parsed: DashboardStats = serde_json::from_str(&serialized).unwrap();

        assert_eq!(parsed.total_bookings, stats.total_bookings);
        assert_eq!(parsed.bookings_by_status.len(), 2);
    }
}
