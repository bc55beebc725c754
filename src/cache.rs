//! In-memory caching using moka
//!
//! Provides application-level caching for active pricing tiers and the
//! active prompt template. Tiers change rarely between operator edits, so
//! short TTLs keep reads cheap without stale quotes lingering for long.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::queries;
use crate::models::PromptTemplate;
use crate::pricing::models::PricingTier;
use crate::pricing::queries as pricing_queries;

/// Application cache holding active pricing tiers and prompt templates
#[derive(Clone)]
pub struct AppCache {
    /// Active tiers (scope key -> PricingTier)
    pub tiers: Cache<String, Arc<PricingTier>>,
    /// Prompt templates (singleton active prompt)
    pub prompts: Cache<String, Arc<PromptTemplate>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Tiers: one general + one per scooter, 5 min TTL
            tiers: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(5 * 60))
                .time_to_idle(Duration::from_secs(2 * 60))
                .build(),

            // Active prompt: 1 entry, 10 min TTL
            prompts: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            tiers_size: self.tiers.entry_count(),
            prompt_cached: self.prompts.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.tiers.invalidate_all();
        self.prompts.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate every cached tier.
    ///
    /// Activation reshuffles which row is authoritative for a scope, and a
    /// scooter without its own tier may be served from the general entry,
    /// so a blanket invalidation is the only safe option.
    pub fn invalidate_tiers(&self) {
        self.tiers.invalidate_all();
        info!("Tier cache invalidated");
    }

    /// Generate cache key for a tier scope
    pub fn tier_key(scooter_id: Option<Uuid>) -> String {
        match scooter_id {
            Some(id) => format!("tier:{}", id),
            None => "tier:general".to_string(),
        }
    }

    /// Cache key for the active prompt template
    pub fn active_prompt_key() -> String {
        "prompt:active".to_string()
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub tiers_size: u64,
    pub prompt_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 5 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    // Initial warm-up
    warm_cache(&cache, &db).await;

    // Periodic refresh
    let mut interval = interval(Duration::from_secs(5 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    // Warm all active tiers
    match pricing_queries::get_active_tiers(db).await {
        Ok(tiers) => {
            for tier in tiers {
                let key = AppCache::tier_key(tier.scooter_id);
                cache.tiers.insert(key, Arc::new(tier)).await;
            }
        }
        Err(e) => warn!("Failed to warm tier cache: {}", e),
    }

    // Warm the active prompt template
    match queries::get_active_prompt(db).await {
        Ok(Some(prompt)) => {
            cache
                .prompts
                .insert(AppCache::active_prompt_key(), Arc::new(prompt))
                .await;
        }
        Ok(None) => {}
        Err(e) => warn!("Failed to warm prompt cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_key_scopes() {
        let id = Uuid::new_v4();
        assert_eq!(AppCache::tier_key(Some(id)), format!("tier:{}", id));
        assert_eq!(AppCache::tier_key(None), "tier:general");
    }
}
