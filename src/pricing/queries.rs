//! Database queries for the pricing engine.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::PricingTier;

const TIER_COLUMNS: &str = r#"
    id, scooter_id, base_price,
    one_year_rent, six_month_high_season, six_month_low_season,
    days_1_3, days_4_7, days_7_14, days_15_25,
    december_price, january_price, february_price, march_price,
    april_price, may_price, summer_price, september_price,
    october_price, november_price,
    is_active, created_at, updated_at
"#;

/// Find the active tier scoped to a specific scooter
pub async fn find_active_tier_for_scooter(
    pool: &PgPool,
    scooter_id: Uuid,
) -> Result<Option<PricingTier>, AppError> {
    let tier = sqlx::query_as::<_, PricingTier>(&format!(
        r#"
        SELECT {TIER_COLUMNS}
        FROM pricing_tiers
        WHERE scooter_id = $1
          AND is_active
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    ))
    .bind(scooter_id)
    .fetch_optional(pool)
    .await?;

    Ok(tier)
}

/// Find the active general (fleet-wide) tier
pub async fn find_active_general_tier(pool: &PgPool) -> Result<Option<PricingTier>, AppError> {
    let tier = sqlx::query_as::<_, PricingTier>(&format!(
        r#"
        SELECT {TIER_COLUMNS}
        FROM pricing_tiers
        WHERE scooter_id IS NULL
          AND is_active
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    ))
    .fetch_optional(pool)
    .await?;

    Ok(tier)
}

/// Make a tier the single active one within its scope.
///
/// Peers sharing the tier's scope (same scooter, or both general) are
/// deactivated and the target activated inside one transaction, so two
/// concurrent activations can never leave two active rows behind.
pub async fn activate_tier(pool: &PgPool, tier_id: Uuid) -> Result<PricingTier, AppError> {
    let mut tx = pool.begin().await?;

    let scooter_id: Option<Uuid> =
        sqlx::query_scalar("SELECT scooter_id FROM pricing_tiers WHERE id = $1")
            .bind(tier_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound)?;

    sqlx::query(
        r#"
        UPDATE pricing_tiers
        SET is_active = false, updated_at = now()
        WHERE scooter_id IS NOT DISTINCT FROM $1
          AND id <> $2
          AND is_active
        "#,
    )
    .bind(scooter_id)
    .bind(tier_id)
    .execute(&mut *tx)
    .await?;

    let tier = sqlx::query_as::<_, PricingTier>(&format!(
        r#"
        UPDATE pricing_tiers
        SET is_active = true, updated_at = now()
        WHERE id = $1
        RETURNING {TIER_COLUMNS}
        "#,
    ))
    .bind(tier_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(tier)
}

/// Get all active tiers (for cache warming)
pub async fn get_active_tiers(pool: &PgPool) -> Result<Vec<PricingTier>, AppError> {
    let tiers = sqlx::query_as::<_, PricingTier>(&format!(
        r#"
        SELECT {TIER_COLUMNS}
        FROM pricing_tiers
        WHERE is_active
        ORDER BY scooter_id NULLS FIRST, updated_at DESC
        "#,
    ))
    .fetch_all(pool)
    .await?;

    Ok(tiers)
}
