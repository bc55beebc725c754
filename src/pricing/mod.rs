//! Pricing engine module.
//!
//! Resolves rental durations and per-day rates against duration-tiered and
//! season-tiered price lists, and exposes the calculations over JSON.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{rate_for_duration, rental_duration_days, round_money, season_rate};
pub use models::PricingTier;
pub use routes::router;
pub use services::{PricingError, RentalQuote, ResolvedRate};
