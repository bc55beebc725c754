//! Request DTOs for pricing API endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Request to quote a rental over a date range
#[derive(Debug, Deserialize)]
pub struct QuoteRentalRequest {
    pub scooter_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Request to resolve a per-day rate without a total
#[derive(Debug, Deserialize)]
pub struct ResolveRateRequest {
    pub scooter_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Request to resolve the seasonal per-day rate for a calendar date.
///
/// Seasonal selection is its own mode; it is never combined with the
/// duration bands.
#[derive(Debug, Deserialize)]
pub struct SeasonRateRequest {
    pub scooter_id: Uuid,
    pub date: NaiveDate,
}
