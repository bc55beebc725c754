//! Database queries for customers, scooters, rentals and chat history

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    ChatMessage, Customer, PromptTemplate, Rental, RentalStatus, Scooter, ScooterMaintenance,
};
use crate::models::prompt::{DEFAULT_PROMPT_NAME, DEFAULT_SYSTEM_PROMPT};

const RENTAL_COLUMNS: &str = r#"
    id, customer_id, scooter_id,
    start_date, end_date, actual_end_date,
    status, daily_rate, total_amount, deposit,
    notes, created_at, updated_at
"#;

/// Get a customer by id
pub async fn get_customer(pool: &PgPool, customer_id: Uuid) -> Result<Customer> {
    sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, phone_number, telegram_id, telegram_username,
               is_active, notes, created_at, updated_at
        FROM customers
        WHERE id = $1
        "#,
    )
    .bind(customer_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Find a customer by phone number
pub async fn find_customer_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, phone_number, telegram_id, telegram_username,
               is_active, notes, created_at, updated_at
        FROM customers
        WHERE phone_number = $1
        "#,
    )
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

/// Find a customer by Telegram id
pub async fn find_customer_by_telegram(
    pool: &PgPool,
    telegram_id: i64,
) -> Result<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, phone_number, telegram_id, telegram_username,
               is_active, notes, created_at, updated_at
        FROM customers
        WHERE telegram_id = $1
        "#,
    )
    .bind(telegram_id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

/// Get a scooter by id
pub async fn get_scooter(pool: &PgPool, scooter_id: Uuid) -> Result<Scooter> {
    sqlx::query_as::<_, Scooter>(
        r#"
        SELECT id, model, power, year, color, fleet_number,
               sticker, rental_sticker, photo_link, gps_tracker_id,
               is_available, created_at, updated_at
        FROM scooters
        WHERE id = $1
        "#,
    )
    .bind(scooter_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Find a scooter by its legacy fleet number (unique across the fleet)
pub async fn find_scooter_by_fleet_number(
    pool: &PgPool,
    fleet_number: &str,
) -> Result<Option<Scooter>> {
    let scooter = sqlx::query_as::<_, Scooter>(
        r#"
        SELECT id, model, power, year, color, fleet_number,
               sticker, rental_sticker, photo_link, gps_tracker_id,
               is_available, created_at, updated_at
        FROM scooters
        WHERE fleet_number = $1
        "#,
    )
    .bind(fleet_number)
    .fetch_optional(pool)
    .await?;

    Ok(scooter)
}

/// List scooters currently available for rental
pub async fn list_available_scooters(pool: &PgPool) -> Result<Vec<Scooter>> {
    let scooters = sqlx::query_as::<_, Scooter>(
        r#"
        SELECT id, model, power, year, color, fleet_number,
               sticker, rental_sticker, photo_link, gps_tracker_id,
               is_available, created_at, updated_at
        FROM scooters
        WHERE is_available
        ORDER BY model, year
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(scooters)
}

/// Get the maintenance record for a scooter
pub async fn get_maintenance(pool: &PgPool, scooter_id: Uuid) -> Result<ScooterMaintenance> {
    sqlx::query_as::<_, ScooterMaintenance>(
        r#"
        SELECT id, scooter_id,
               engine_oil_km, gear_oil_km, radiator_water_km,
               front_brakes_km, rear_brakes_km, air_filter_km, spark_plugs_km,
               tech_inspection_date, insurance_date,
               cigarette_lighter, front_bearing, rear_bearing,
               front_tire, rear_tire, battery, belt, starter, gasket, water,
               last_service_date, replacement_date
        FROM scooter_maintenance
        WHERE scooter_id = $1
        "#,
    )
    .bind(scooter_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Get a rental by id
pub async fn get_rental(pool: &PgPool, rental_id: Uuid) -> Result<Rental> {
    sqlx::query_as::<_, Rental>(&format!(
        r#"
        SELECT {RENTAL_COLUMNS}
        FROM rentals
        WHERE id = $1
        "#,
    ))
    .bind(rental_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// List rentals by status, newest first
pub async fn list_rentals_by_status(
    pool: &PgPool,
    status: RentalStatus,
) -> Result<Vec<Rental>> {
    let rentals = sqlx::query_as::<_, Rental>(&format!(
        r#"
        SELECT {RENTAL_COLUMNS}
        FROM rentals
        WHERE status = $1
        ORDER BY start_date DESC
        "#,
    ))
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(rentals)
}

/// List rentals that are overdue as of `now`.
///
/// Same predicate as `Rental::is_overdue`: still active with the planned
/// end strictly in the past. Nothing is written; persisting the overdue
/// status stays with the external sweep.
pub async fn list_overdue_rentals(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Rental>> {
    let rentals = sqlx::query_as::<_, Rental>(&format!(
        r#"
        SELECT {RENTAL_COLUMNS}
        FROM rentals
        WHERE status = 'active'
          AND end_date < $1
        ORDER BY end_date
        "#,
    ))
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rentals)
}

/// Complete a rental: record the actual return time and the final total.
///
/// Only active or overdue rentals can complete; anything else is a conflict.
pub async fn complete_rental(
    pool: &PgPool,
    rental_id: Uuid,
    actual_end: DateTime<Utc>,
    total_amount: Decimal,
) -> Result<Rental> {
    sqlx::query_as::<_, Rental>(&format!(
        r#"
        UPDATE rentals
        SET status = 'completed',
            actual_end_date = $2,
            total_amount = $3,
            updated_at = now()
        WHERE id = $1
          AND status IN ('active', 'overdue')
        RETURNING {RENTAL_COLUMNS}
        "#,
    ))
    .bind(rental_id)
    .bind(actual_end)
    .bind(total_amount)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::Conflict("rental is not open for return".to_string()))
}

/// Cancel a rental. Only active or overdue rentals can be cancelled.
pub async fn cancel_rental(pool: &PgPool, rental_id: Uuid) -> Result<Rental> {
    sqlx::query_as::<_, Rental>(&format!(
        r#"
        UPDATE rentals
        SET status = 'cancelled',
            updated_at = now()
        WHERE id = $1
          AND status IN ('active', 'overdue')
        RETURNING {RENTAL_COLUMNS}
        "#,
    ))
    .bind(rental_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::Conflict("rental is not open for cancellation".to_string()))
}

/// Recent chat messages for a customer, newest first
pub async fn get_recent_messages(
    pool: &PgPool,
    customer_id: Uuid,
    limit: i64,
) -> Result<Vec<ChatMessage>> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, customer_id, platform, direction, message_text,
               external_message_id, sender_name, context_summary,
               is_processed_by_ai, ai_response, message_timestamp,
               metadata, created_at
        FROM chat_messages
        WHERE customer_id = $1
        ORDER BY message_timestamp DESC
        LIMIT $2
        "#,
    )
    .bind(customer_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Incoming messages not yet processed by the assistant, oldest first
pub async fn list_unprocessed_messages(pool: &PgPool, limit: i64) -> Result<Vec<ChatMessage>> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, customer_id, platform, direction, message_text,
               external_message_id, sender_name, context_summary,
               is_processed_by_ai, ai_response, message_timestamp,
               metadata, created_at
        FROM chat_messages
        WHERE direction = 'incoming'
          AND NOT is_processed_by_ai
        ORDER BY message_timestamp
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Get the active prompt template, if one exists
pub async fn get_active_prompt(pool: &PgPool) -> Result<Option<PromptTemplate>> {
    let prompt = sqlx::query_as::<_, PromptTemplate>(
        r#"
        SELECT id, name, description, system_prompt, is_active,
               created_at, updated_at
        FROM prompt_templates
        WHERE is_active
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(prompt)
}

/// Get the active prompt template, creating the default one when none exists.
///
/// The lookup and the insert run in one transaction so concurrent callers
/// cannot both observe "no active prompt" and insert two defaults.
pub async fn get_or_create_default_prompt(pool: &PgPool) -> Result<PromptTemplate> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, PromptTemplate>(
        r#"
        SELECT id, name, description, system_prompt, is_active,
               created_at, updated_at
        FROM prompt_templates
        WHERE is_active
        ORDER BY updated_at DESC
        LIMIT 1
        FOR UPDATE
        "#,
    )
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(prompt) = existing {
        tx.commit().await?;
        return Ok(prompt);
    }

    let prompt = sqlx::query_as::<_, PromptTemplate>(
        r#"
        INSERT INTO prompt_templates (id, name, description, system_prompt, is_active)
        VALUES (gen_random_uuid(), $1, $2, $3, true)
        RETURNING id, name, description, system_prompt, is_active,
                  created_at, updated_at
        "#,
    )
    .bind(DEFAULT_PROMPT_NAME)
    .bind("Baseline consultation prompt for scooter rentals")
    .bind(DEFAULT_SYSTEM_PROMPT)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(prompt)
}

/// Make a prompt template the single active one.
///
/// Same transactional exclusivity pattern as tier activation: peers are
/// deactivated and the target activated in one commit.
pub async fn activate_prompt(pool: &PgPool, prompt_id: Uuid) -> Result<PromptTemplate> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE prompt_templates
        SET is_active = false, updated_at = now()
        WHERE id <> $1
          AND is_active
        "#,
    )
    .bind(prompt_id)
    .execute(&mut *tx)
    .await?;

    let prompt = sqlx::query_as::<_, PromptTemplate>(
        r#"
        UPDATE prompt_templates
        SET is_active = true, updated_at = now()
        WHERE id = $1
        RETURNING id, name, description, system_prompt, is_active,
                  created_at, updated_at
        "#,
    )
    .bind(prompt_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound)?;

    tx.commit().await?;

    Ok(prompt)
}
