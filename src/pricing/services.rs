//! Pricing service functions with database access.
//!
//! These functions query the database and cache to resolve the tier that
//! applies to a scooter and turn rental dates into a priced quote.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;

use super::calculators::{rate_for_duration, rental_duration_days, rental_total};
use super::models::PricingTier;
use super::queries;

/// Result of a rental quote
#[derive(Debug, Clone)]
pub struct RentalQuote {
    pub duration_days: i64,
    pub daily_rate: Decimal,
    pub total_amount: Decimal,
    pub tier_id: Uuid,
    pub tier_is_general: bool,
}

/// Result of a standalone rate resolution
#[derive(Debug, Clone)]
pub struct ResolvedRate {
    pub duration_days: i64,
    pub daily_rate: Decimal,
    pub tier_id: Uuid,
    pub tier_is_general: bool,
}

/// Pricing calculation error types
#[derive(Debug, Clone)]
pub enum PricingError {
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
    },
    NoPricingAvailable {
        scooter_id: Uuid,
    },
    Database {
        message: String,
    },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidDateRange { start, end } => {
                write!(f, "Rental start date {} is after end date {}", start, end)
            }
            PricingError::NoPricingAvailable { scooter_id } => {
                write!(
                    f,
                    "No active pricing tier for scooter {} and no general tier",
                    scooter_id
                )
            }
            PricingError::Database { message } => {
                write!(f, "Database error during pricing: {}", message)
            }
        }
    }
}

impl std::error::Error for PricingError {}

impl From<crate::error::AppError> for PricingError {
    fn from(err: crate::error::AppError) -> Self {
        PricingError::Database {
            message: err.to_string(),
        }
    }
}

/// Find the authoritative tier for a scooter.
///
/// Resolution order: active scooter-specific tier, then the active general
/// tier. If neither exists the resolver refuses to guess a price.
pub async fn resolve_tier(
    pool: &PgPool,
    cache: &AppCache,
    scooter_id: Uuid,
) -> Result<PricingTier, PricingError> {
    let cache_key = AppCache::tier_key(Some(scooter_id));
    if let Some(cached) = cache.tiers.get(&cache_key).await {
        return Ok((*cached).clone());
    }

    if let Some(tier) = queries::find_active_tier_for_scooter(pool, scooter_id).await? {
        cache
            .tiers
            .insert(cache_key, Arc::new(tier.clone()))
            .await;
        return Ok(tier);
    }

    let general_key = AppCache::tier_key(None);
    if let Some(cached) = cache.tiers.get(&general_key).await {
        return Ok((*cached).clone());
    }

    let tier = queries::find_active_general_tier(pool)
        .await?
        .ok_or(PricingError::NoPricingAvailable { scooter_id })?;

    cache
        .tiers
        .insert(general_key, Arc::new(tier.clone()))
        .await;

    Ok(tier)
}

/// Resolve the per-day rate for a scooter over a date range.
pub async fn resolve_daily_rate(
    pool: &PgPool,
    cache: &AppCache,
    scooter_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ResolvedRate, PricingError> {
    let days = rental_duration_days(start, end)?;
    let tier = resolve_tier(pool, cache, scooter_id).await?;

    Ok(ResolvedRate {
        duration_days: days,
        daily_rate: rate_for_duration(&tier, days),
        tier_id: tier.id,
        tier_is_general: tier.is_general(),
    })
}

/// Quote a rental: duration, per-day rate and total amount.
///
/// The total is duration times rate, banker's-rounded to 2 places. The
/// caller persists it onto the rental record once the rental is finalized.
pub async fn quote_rental(
    pool: &PgPool,
    cache: &AppCache,
    scooter_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<RentalQuote, PricingError> {
    let rate = resolve_daily_rate(pool, cache, scooter_id, start, end).await?;

    Ok(RentalQuote {
        duration_days: rate.duration_days,
        daily_rate: rate.daily_rate,
        total_amount: rental_total(rate.daily_rate, rate.duration_days),
        tier_id: rate.tier_id,
        tier_is_general: rate.tier_is_general,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert!(err.to_string().contains("2024-03-05"));
        assert!(err.to_string().contains("2024-03-01"));

        let scooter_id = Uuid::new_v4();
        let err = PricingError::NoPricingAvailable { scooter_id };
        assert!(err.to_string().contains(&scooter_id.to_string()));

        let err = PricingError::Database {
            message: "connection reset".to_string(),
        };
        assert!(err.to_string().contains("connection reset"));
    }
}
