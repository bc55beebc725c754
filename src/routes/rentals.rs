//! Rental route handlers

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Rental, RentalStatus};
use crate::pricing::calculators::{rental_duration_days, rental_total};
use crate::pricing::services::PricingError;
use crate::AppState;
use uuid::Uuid;

/// Body for returning a rental; the return time defaults to now
#[derive(Debug, Default, Deserialize)]
pub struct ReturnRentalRequest {
    #[serde(default)]
    pub actual_end_date: Option<DateTime<Utc>>,
}

/// Rentals still active past their planned end.
///
/// Derived view only; statuses are not rewritten here.
async fn overdue(State(state): State<AppState>) -> Result<Json<Vec<Rental>>> {
    let rentals = db::list_overdue_rentals(&state.db, Utc::now()).await?;
    Ok(Json(rentals))
}

/// Confirm a return: set the actual end, compute the final total from the
/// rental's fixed daily rate, and complete the rental.
async fn return_rental(
    State(state): State<AppState>,
    Path(rental_id): Path<Uuid>,
    body: Option<Json<ReturnRentalRequest>>,
) -> Result<Json<Rental>> {
    let rental = db::get_rental(&state.db, rental_id).await?;

    if !rental.status.can_transition_to(RentalStatus::Completed) {
        return Err(AppError::Conflict(format!(
            "rental {} cannot complete from its current status",
            rental_id
        )));
    }

    let actual_end = body
        .and_then(|Json(req)| req.actual_end_date)
        .unwrap_or_else(Utc::now);

    let days = rental_duration_days(rental.start_date, actual_end).map_err(|e| match e {
        PricingError::InvalidDateRange { .. } => AppError::InvalidInput(e.to_string()),
        other => AppError::Internal(other.to_string()),
    })?;
    let total = rental_total(rental.daily_rate, days);

    let completed = db::complete_rental(&state.db, rental_id, actual_end, total).await?;
    Ok(Json(completed))
}

/// Cancel an open rental
async fn cancel_rental(
    State(state): State<AppState>,
    Path(rental_id): Path<Uuid>,
) -> Result<Json<Rental>> {
    let rental = db::get_rental(&state.db, rental_id).await?;

    if !rental.status.can_transition_to(RentalStatus::Cancelled) {
        return Err(AppError::Conflict(format!(
            "rental {} cannot cancel from its current status",
            rental_id
        )));
    }

    let cancelled = db::cancel_rental(&state.db, rental_id).await?;
    Ok(Json(cancelled))
}

/// Rental API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overdue", get(overdue))
        .route("/:rental_id/return", post(return_rental))
        .route("/:rental_id/cancel", post(cancel_rental))
}
