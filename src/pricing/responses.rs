//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Response for a rental quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub duration_days: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub daily_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub tier_id: Uuid,
    pub tier_is_general: bool,
}

/// Response for a standalone rate resolution
#[derive(Debug, Serialize)]
pub struct ResolveRateResponse {
    pub duration_days: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub daily_rate: Decimal,
    pub tier_id: Uuid,
    pub tier_is_general: bool,
}

/// Response for a seasonal rate lookup
#[derive(Debug, Serialize)]
pub struct SeasonRateResponse {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub daily_rate: Decimal,
    pub tier_id: Uuid,
    pub tier_is_general: bool,
}

/// Summary of a pricing tier after activation
#[derive(Debug, Serialize)]
pub struct TierResponse {
    pub id: Uuid,
    pub scooter_id: Option<Uuid>,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    pub is_active: bool,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
}
