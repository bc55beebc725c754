//! Pricing route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::AppState;

use super::calculators::season_rate;
use super::queries;
use super::requests::{QuoteRentalRequest, ResolveRateRequest, SeasonRateRequest};
use super::responses::{
    PricingErrorResponse, QuoteResponse, ResolveRateResponse, SeasonRateResponse, TierResponse,
};
use super::services::{self, PricingError};

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PricingError::InvalidDateRange { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_date_range")
            }
            PricingError::NoPricingAvailable { .. } => {
                (StatusCode::NOT_FOUND, "no_pricing_available")
            }
            PricingError::Database { message } => {
                tracing::error!("Pricing database error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "database")
            }
        };

        let body = Json(PricingErrorResponse {
            error_type: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Quote a rental: duration, per-day rate and rounded total
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRentalRequest>,
) -> Result<Json<QuoteResponse>, PricingError> {
    let quote = services::quote_rental(
        &state.db,
        &state.cache,
        req.scooter_id,
        req.start_date,
        req.end_date,
    )
    .await?;

    Ok(Json(QuoteResponse {
        duration_days: quote.duration_days,
        daily_rate: quote.daily_rate,
        total_amount: quote.total_amount,
        tier_id: quote.tier_id,
        tier_is_general: quote.tier_is_general,
    }))
}

/// Resolve a per-day rate without computing a total
async fn resolve_rate(
    State(state): State<AppState>,
    Json(req): Json<ResolveRateRequest>,
) -> Result<Json<ResolveRateResponse>, PricingError> {
    let rate = services::resolve_daily_rate(
        &state.db,
        &state.cache,
        req.scooter_id,
        req.start_date,
        req.end_date,
    )
    .await?;

    Ok(Json(ResolveRateResponse {
        duration_days: rate.duration_days,
        daily_rate: rate.daily_rate,
        tier_id: rate.tier_id,
        tier_is_general: rate.tier_is_general,
    }))
}

/// Seasonal per-day rate for a calendar date (explicit mode, never mixed
/// with duration bands)
async fn season(
    State(state): State<AppState>,
    Json(req): Json<SeasonRateRequest>,
) -> Result<Json<SeasonRateResponse>, PricingError> {
    let tier = services::resolve_tier(&state.db, &state.cache, req.scooter_id).await?;

    Ok(Json(SeasonRateResponse {
        date: req.date,
        daily_rate: season_rate(&tier, req.date),
        tier_id: tier.id,
        tier_is_general: tier.is_general(),
    }))
}

/// Activate a tier, deactivating its scope peers in one transaction
async fn activate_tier(
    State(state): State<AppState>,
    Path(tier_id): Path<Uuid>,
) -> crate::error::Result<Json<TierResponse>> {
    let tier = queries::activate_tier(&state.db, tier_id).await?;

    // Cached entries may point at a now-inactive row
    state.cache.invalidate_tiers();

    Ok(Json(TierResponse {
        id: tier.id,
        scooter_id: tier.scooter_id,
        base_price: tier.base_price,
        is_active: tier.is_active,
    }))
}

/// Pricing API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", post(quote))
        .route("/resolve", post(resolve_rate))
        .route("/season-rate", post(season))
        .route("/tiers/:tier_id/activate", post(activate_tier))
}
