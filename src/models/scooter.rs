//! Scooter and maintenance models

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Scooter from scooters
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scooter {
    pub id: Uuid,
    pub model: String,
    pub power: String,
    pub year: i32,
    pub color: String,
    /// Legacy fleet number, unique across the fleet
    pub fleet_number: String,
    pub sticker: String,
    pub rental_sticker: String,
    pub photo_link: String,
    pub gps_tracker_id: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for Scooter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.model, self.year, self.fleet_number)
    }
}

/// Maintenance record from scooter_maintenance, one row per scooter.
///
/// The `*_km` fields hold the odometer reading at the last replacement of
/// that consumable; the free-text fields hold component condition notes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScooterMaintenance {
    pub id: Uuid,
    pub scooter_id: Uuid,

    pub engine_oil_km: i32,
    pub gear_oil_km: i32,
    pub radiator_water_km: i32,
    pub front_brakes_km: i32,
    pub rear_brakes_km: i32,
    pub air_filter_km: i32,
    pub spark_plugs_km: i32,

    pub tech_inspection_date: Option<NaiveDate>,
    pub insurance_date: Option<NaiveDate>,

    pub cigarette_lighter: bool,
    pub front_bearing: String,
    pub rear_bearing: String,
    pub front_tire: String,
    pub rear_tire: String,
    pub battery: String,
    pub belt: String,
    pub starter: String,
    pub gasket: String,
    pub water: String,

    pub last_service_date: Option<NaiveDate>,
    pub replacement_date: Option<NaiveDate>,
}

impl ScooterMaintenance {
    /// Whether the insurance document has lapsed as of the given date.
    pub fn insurance_expired(&self, today: NaiveDate) -> bool {
        matches!(self.insurance_date, Some(date) if date < today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scooter_display() {
        let scooter = Scooter {
            id: Uuid::new_v4(),
            model: "Honda PCX".to_string(),
            power: "150cc".to_string(),
            year: 2022,
            color: "white".to_string(),
            fleet_number: "S-014".to_string(),
            sticker: String::new(),
            rental_sticker: String::new(),
            photo_link: String::new(),
            gps_tracker_id: String::new(),
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(scooter.to_string(), "Honda PCX 2022 (S-014)");
    }

    #[test]
    fn test_insurance_expired() {
        let maintenance = ScooterMaintenance {
            id: Uuid::new_v4(),
            scooter_id: Uuid::new_v4(),
            engine_oil_km: 0,
            gear_oil_km: 0,
            radiator_water_km: 0,
            front_brakes_km: 0,
            rear_brakes_km: 0,
            air_filter_km: 0,
            spark_plugs_km: 0,
            tech_inspection_date: None,
            insurance_date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            cigarette_lighter: false,
            front_bearing: String::new(),
            rear_bearing: String::new(),
            front_tire: String::new(),
            rear_tire: String::new(),
            battery: String::new(),
            belt: String::new(),
            starter: String::new(),
            gasket: String::new(),
            water: String::new(),
            last_service_date: None,
            replacement_date: None,
        };

        let before = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert!(!maintenance.insurance_expired(before));
        assert!(maintenance.insurance_expired(after));
    }
}
