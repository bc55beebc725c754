//! Rental model and status state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::calculators::rental_duration_days;
use crate::pricing::services::PricingError;

/// Rental status.
///
/// `Active` transitions to `Completed` on confirmed return or to `Cancelled`
/// manually; both are terminal. `Overdue` is an observed state: it is derived
/// by [`Rental::is_overdue`] and only persisted when an external sweep
/// chooses to, so an overdue rental can still be returned or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Completed,
    Cancelled,
    Overdue,
}

impl RentalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Completed | RentalStatus::Cancelled)
    }

    /// Whether the status may move to `next`.
    pub fn can_transition_to(&self, next: RentalStatus) -> bool {
        match (self, next) {
            (RentalStatus::Active, RentalStatus::Completed)
            | (RentalStatus::Active, RentalStatus::Cancelled)
            | (RentalStatus::Active, RentalStatus::Overdue)
            | (RentalStatus::Overdue, RentalStatus::Completed)
            | (RentalStatus::Overdue, RentalStatus::Cancelled) => true,
            _ => false,
        }
    }
}

/// Rental from rentals.
///
/// `daily_rate` is fixed when the rental starts; `total_amount` is cached
/// onto the row once the rental is finalized. Rentals are never deleted,
/// only moved through status transitions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rental {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub scooter_id: Uuid,
    pub start_date: DateTime<Utc>,
    /// Planned end of the rental
    pub end_date: DateTime<Utc>,
    /// Actual return time, set on completion
    pub actual_end_date: Option<DateTime<Utc>>,
    pub status: RentalStatus,
    pub daily_rate: Decimal,
    pub total_amount: Option<Decimal>,
    pub deposit: Decimal,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    /// End timestamp used for billing: the actual return if recorded,
    /// otherwise the planned end.
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.actual_end_date.unwrap_or(self.end_date)
    }

    /// Billable duration in days, endpoints inclusive.
    pub fn duration_days(&self) -> Result<i64, PricingError> {
        rental_duration_days(self.start_date, self.effective_end())
    }

    /// Whether the rental is overdue as of `now`: still active and past its
    /// planned end. Pure predicate; nothing is persisted here.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == RentalStatus::Active && self.end_date < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn rental(status: RentalStatus) -> Rental {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        Rental {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            scooter_id: Uuid::new_v4(),
            start_date: start,
            end_date: start + Duration::days(6),
            actual_end_date: None,
            status,
            daily_rate: dec!(320),
            total_amount: None,
            deposit: dec!(3000),
            notes: String::new(),
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_duration_uses_planned_end_when_open() {
        let r = rental(RentalStatus::Active);
        assert_eq!(r.duration_days().unwrap(), 7);
    }

    #[test]
    fn test_duration_prefers_actual_end() {
        let mut r = rental(RentalStatus::Completed);
        r.actual_end_date = Some(r.start_date + Duration::days(2));
        assert_eq!(r.duration_days().unwrap(), 3);
    }

    #[test]
    fn test_overdue_requires_active_status() {
        let past_end = rental(RentalStatus::Active).end_date + Duration::days(1);

        assert!(rental(RentalStatus::Active).is_overdue(past_end));
        assert!(!rental(RentalStatus::Completed).is_overdue(past_end));
        assert!(!rental(RentalStatus::Cancelled).is_overdue(past_end));
    }

    #[test]
    fn test_overdue_requires_past_planned_end() {
        let r = rental(RentalStatus::Active);
        assert!(!r.is_overdue(r.end_date - Duration::hours(1)));
        // Planned end itself is not overdue; strictly past it is
        assert!(!r.is_overdue(r.end_date));
        assert!(r.is_overdue(r.end_date + Duration::seconds(1)));
    }

    #[test]
    fn test_status_transitions() {
        use RentalStatus::*;

        assert!(Active.can_transition_to(Completed));
        assert!(Active.can_transition_to(Cancelled));
        assert!(Active.can_transition_to(Overdue));
        assert!(Overdue.can_transition_to(Completed));
        assert!(Overdue.can_transition_to(Cancelled));

        assert!(!Completed.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(!Overdue.can_transition_to(Active));

        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Active.is_terminal());
        assert!(!Overdue.is_terminal());
    }
}
