//! Core pricing calculation functions.
//!
//! Pure functions for duration and rate math - no database access.
//! Rate resolution walks an ordered band table so that band boundaries
//! and the fallback-to-base policy stay independently testable.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::models::PricingTier;
use super::services::PricingError;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use motorent_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Billable duration of a rental in whole days, endpoints inclusive.
///
/// Timestamps are truncated to calendar dates before subtracting; time of day
/// never affects the count. A same-day rental is 1 day, never 0.
///
/// Returns [`PricingError::InvalidDateRange`] when the start date falls after
/// the end date. A negative duration is never produced.
pub fn rental_duration_days(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, PricingError> {
    let start_date = start.date_naive();
    let end_date = end.date_naive();

    if start_date > end_date {
        return Err(PricingError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }

    Ok((end_date - start_date).num_days() + 1)
}

/// A contiguous duration range with its own optional per-day rate override.
pub struct DurationBand {
    pub min_days: i64,
    pub max_days: i64,
    override_rate: fn(&PricingTier) -> Option<Decimal>,
}

impl DurationBand {
    /// Whether the band covers the given duration.
    pub fn covers(&self, days: i64) -> bool {
        (self.min_days..=self.max_days).contains(&days)
    }
}

/// Duration bands in resolution order. Durations past the last band always
/// resolve to the base price; the long-term fields (6-month, 1-year) are
/// never auto-selected by duration and require explicit operator choice.
pub const DURATION_BANDS: &[DurationBand] = &[
    DurationBand { min_days: 1, max_days: 3, override_rate: PricingTier::band_1_3 },
    DurationBand { min_days: 4, max_days: 7, override_rate: PricingTier::band_4_7 },
    DurationBand { min_days: 8, max_days: 14, override_rate: PricingTier::band_7_14 },
    DurationBand { min_days: 15, max_days: 25, override_rate: PricingTier::band_15_25 },
];

/// Resolve the per-day rate for a duration against a pricing tier.
///
/// The first band covering the duration supplies its override if set;
/// a missing override falls through to the base price, never to zero.
pub fn rate_for_duration(tier: &PricingTier, days: i64) -> Decimal {
    DURATION_BANDS
        .iter()
        .find(|band| band.covers(days))
        .and_then(|band| (band.override_rate)(tier))
        .unwrap_or(tier.base_price)
}

/// Seasonal price bucket, one per calendar month with June-August collapsed
/// into a single summer bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonBucket {
    December,
    January,
    February,
    March,
    April,
    May,
    Summer,
    September,
    October,
    November,
}

impl SeasonBucket {
    /// Bucket for a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            12 => SeasonBucket::December,
            1 => SeasonBucket::January,
            2 => SeasonBucket::February,
            3 => SeasonBucket::March,
            4 => SeasonBucket::April,
            5 => SeasonBucket::May,
            6..=8 => SeasonBucket::Summer,
            9 => SeasonBucket::September,
            10 => SeasonBucket::October,
            _ => SeasonBucket::November,
        }
    }
}

/// Resolve the per-day rate for a calendar date using the seasonal overrides.
///
/// This is a separate, explicit rate-selection mode: the duration resolver
/// never consults the seasonal fields, and nothing here consults the duration
/// bands. Callers pick one mode or the other.
pub fn season_rate(tier: &PricingTier, date: NaiveDate) -> Decimal {
    tier.season_override(SeasonBucket::for_date(date))
        .unwrap_or(tier.base_price)
}

/// Total amount for a rental: duration times per-day rate, banker's-rounded
/// to 2 places.
pub fn rental_total(daily_rate: Decimal, days: i64) -> Decimal {
    round_money(daily_rate * Decimal::from(days), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn tier_with_bands() -> PricingTier {
        PricingTier {
            id: Uuid::new_v4(),
            scooter_id: None,
            base_price: dec!(300),
            one_year_rent: Some(dec!(60000)),
            six_month_high_season: Some(dec!(40000)),
            six_month_low_season: Some(dec!(30000)),
            days_1_3: Some(dec!(350)),
            days_4_7: Some(dec!(320)),
            days_7_14: Some(dec!(280)),
            days_15_25: Some(dec!(250)),
            december_price: Some(dec!(400)),
            january_price: None,
            february_price: None,
            march_price: None,
            april_price: None,
            may_price: None,
            summer_price: Some(dec!(260)),
            september_price: None,
            october_price: None,
            november_price: Some(dec!(330)),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn base_only_tier() -> PricingTier {
        PricingTier {
            days_1_3: None,
            days_4_7: None,
            days_7_14: None,
            days_15_25: None,
            december_price: None,
            summer_price: None,
            november_price: None,
            one_year_rent: None,
            six_month_high_season: None,
            six_month_low_season: None,
            ..tier_with_bands()
        }
    }

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.125), 2), dec!(2.12));
        assert_eq!(round_money(dec!(2.135), 2), dec!(2.14));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== rental_duration_days tests ====================

    #[test]
    fn test_duration_same_day_is_one() {
        let d = rental_duration_days(ts(2024, 1, 1, 9), ts(2024, 1, 1, 18)).unwrap();
        assert_eq!(d, 1);
    }

    #[test]
    fn test_duration_is_inclusive() {
        let d = rental_duration_days(ts(2024, 1, 1, 9), ts(2024, 1, 3, 9)).unwrap();
        assert_eq!(d, 3);
    }

    #[test]
    fn test_duration_ignores_time_of_day() {
        // 23:00 to 01:00 next day is still a 2-day rental
        let d = rental_duration_days(ts(2024, 5, 10, 23), ts(2024, 5, 11, 1)).unwrap();
        assert_eq!(d, 2);
    }

    #[test]
    fn test_duration_spans_month_boundary() {
        let d = rental_duration_days(ts(2024, 1, 30, 12), ts(2024, 2, 2, 12)).unwrap();
        assert_eq!(d, 4);
    }

    #[test]
    fn test_duration_rejects_inverted_range() {
        let err = rental_duration_days(ts(2024, 3, 5, 0), ts(2024, 3, 1, 0)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_duration_same_date_earlier_time_is_valid() {
        // Dates are equal even though start time is later; truncation wins
        let d = rental_duration_days(ts(2024, 3, 5, 20), ts(2024, 3, 5, 8)).unwrap();
        assert_eq!(d, 1);
    }

    // ==================== rate_for_duration tests ====================

    #[test]
    fn test_rate_band_1_3() {
        let tier = tier_with_bands();
        for days in 1..=3 {
            assert_eq!(rate_for_duration(&tier, days), dec!(350));
        }
    }

    #[test]
    fn test_rate_band_4_7() {
        let tier = tier_with_bands();
        for days in 4..=7 {
            assert_eq!(rate_for_duration(&tier, days), dec!(320));
        }
    }

    #[test]
    fn test_rate_band_8_14() {
        let tier = tier_with_bands();
        for days in 8..=14 {
            assert_eq!(rate_for_duration(&tier, days), dec!(280));
        }
    }

    #[test]
    fn test_rate_band_15_25() {
        let tier = tier_with_bands();
        for days in 15..=25 {
            assert_eq!(rate_for_duration(&tier, days), dec!(250));
        }
    }

    #[test]
    fn test_rate_beyond_25_days_is_base_price() {
        let tier = tier_with_bands();
        // Long-term overrides are set but must never be auto-selected
        for days in [26, 30, 180, 365, 1000] {
            assert_eq!(rate_for_duration(&tier, days), dec!(300));
        }
    }

    #[test]
    fn test_rate_missing_override_falls_back_to_base() {
        let tier = base_only_tier();
        for days in [1, 3, 4, 7, 8, 14, 15, 25, 26] {
            assert_eq!(rate_for_duration(&tier, days), dec!(300));
        }
    }

    #[test]
    fn test_rate_partial_overrides() {
        let tier = PricingTier {
            days_4_7: None,
            ..tier_with_bands()
        };
        assert_eq!(rate_for_duration(&tier, 2), dec!(350));
        assert_eq!(rate_for_duration(&tier, 5), dec!(300)); // hole falls to base
        assert_eq!(rate_for_duration(&tier, 10), dec!(280));
    }

    #[test]
    fn test_bands_are_contiguous_and_ordered() {
        let mut expected_min = 1;
        for band in DURATION_BANDS {
            assert_eq!(band.min_days, expected_min);
            assert!(band.max_days >= band.min_days);
            expected_min = band.max_days + 1;
        }
        assert_eq!(expected_min, 26);
    }

    #[test]
    fn test_rate_resolution_is_idempotent() {
        let tier = tier_with_bands();
        let first = rate_for_duration(&tier, 10);
        let second = rate_for_duration(&tier, 10);
        assert_eq!(first, second);
    }

    // ==================== season_rate tests ====================

    #[test]
    fn test_season_bucket_collapses_summer() {
        for month in 6..=8 {
            let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            assert_eq!(SeasonBucket::for_date(date), SeasonBucket::Summer);
        }
    }

    #[test]
    fn test_season_bucket_named_months() {
        let dec_date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(SeasonBucket::for_date(dec_date), SeasonBucket::December);
        let nov_date = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        assert_eq!(SeasonBucket::for_date(nov_date), SeasonBucket::November);
    }

    #[test]
    fn test_season_rate_uses_override() {
        let tier = tier_with_bands();
        let july = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(season_rate(&tier, july), dec!(260));
    }

    #[test]
    fn test_season_rate_falls_back_to_base() {
        let tier = tier_with_bands();
        let march = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(season_rate(&tier, march), dec!(300));
    }

    #[test]
    fn test_season_rate_never_consults_duration_bands() {
        // Bands carry different values; a January date with no January
        // override must resolve to base, not to any band override.
        let tier = tier_with_bands();
        let january = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(season_rate(&tier, january), dec!(300));
    }

    // ==================== rental_total tests ====================

    #[test]
    fn test_rental_total() {
        assert_eq!(rental_total(dec!(350), 3), dec!(1050));
        assert_eq!(rental_total(dec!(333.335), 2), dec!(666.67));
    }
}
