//! Database models for pricing queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::calculators::SeasonBucket;

/// Pricing tier from pricing_tiers.
///
/// A tier is either general (`scooter_id` is null, applies to every scooter
/// without its own tier) or scoped to a single scooter. Every override field
/// is nullable; a null means "use the base price", never "free".
#[derive(Debug, Clone, FromRow)]
pub struct PricingTier {
    pub id: Uuid,
    pub scooter_id: Option<Uuid>,
    pub base_price: Decimal,

    // Long-term prices, data-only: never auto-selected by duration
    pub one_year_rent: Option<Decimal>,
    pub six_month_high_season: Option<Decimal>,
    pub six_month_low_season: Option<Decimal>,

    // Per-day overrides for the short-term duration bands
    pub days_1_3: Option<Decimal>,
    pub days_4_7: Option<Decimal>,
    pub days_7_14: Option<Decimal>,
    pub days_15_25: Option<Decimal>,

    // Seasonal per-day overrides (June-August share the summer field)
    pub december_price: Option<Decimal>,
    pub january_price: Option<Decimal>,
    pub february_price: Option<Decimal>,
    pub march_price: Option<Decimal>,
    pub april_price: Option<Decimal>,
    pub may_price: Option<Decimal>,
    pub summer_price: Option<Decimal>,
    pub september_price: Option<Decimal>,
    pub october_price: Option<Decimal>,
    pub november_price: Option<Decimal>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricingTier {
    /// Whether this tier applies fleet-wide rather than to one scooter.
    pub fn is_general(&self) -> bool {
        self.scooter_id.is_none()
    }

    pub(crate) fn band_1_3(&self) -> Option<Decimal> {
        self.days_1_3
    }

    pub(crate) fn band_4_7(&self) -> Option<Decimal> {
        self.days_4_7
    }

    pub(crate) fn band_7_14(&self) -> Option<Decimal> {
        self.days_7_14
    }

    pub(crate) fn band_15_25(&self) -> Option<Decimal> {
        self.days_15_25
    }

    /// Seasonal override for a bucket, if the operator set one.
    pub fn season_override(&self, bucket: SeasonBucket) -> Option<Decimal> {
        match bucket {
            SeasonBucket::December => self.december_price,
            SeasonBucket::January => self.january_price,
            SeasonBucket::February => self.february_price,
            SeasonBucket::March => self.march_price,
            SeasonBucket::April => self.april_price,
            SeasonBucket::May => self.may_price,
            SeasonBucket::Summer => self.summer_price,
            SeasonBucket::September => self.september_price,
            SeasonBucket::October => self.october_price,
            SeasonBucket::November => self.november_price,
        }
    }
}
