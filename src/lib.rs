//! Motorent pricing and rental data service.
//!
//! Owns the persistent schema of a scooter rental fleet (customers,
//! scooters, maintenance, rentals, chat history, prompt templates) and
//! exposes the pricing/duration resolution over JSON.

pub mod cache;
pub mod db;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

use axum::{extract::State, routing::get, Json, Router};
use sqlx::PgPool;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use cache::{AppCache, CacheStats};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

async fn health() -> &'static str {
    "ok"
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .nest("/api/pricing", pricing::router())
        .nest("/api/rentals", routes::rentals::router())
        .nest("/api", routes::chat::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}
