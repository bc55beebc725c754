//! Chat context route handlers
//!
//! Assembles the stored chat history and the active prompt template into the
//! context document the AI assistant consumes. The assistant integration
//! itself lives outside this service.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::db;
use crate::error::Result;
use crate::AppState;

const DEFAULT_CONTEXT_MESSAGES: i64 = 5;

/// Query parameters for context assembly
#[derive(Debug, Deserialize)]
pub struct ContextQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_CONTEXT_MESSAGES
}

/// Context document handed to the assistant
#[derive(Debug, Serialize)]
pub struct AiContextResponse {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_identifier: String,
    pub system_prompt: String,
    /// Most recent messages, newest first
    pub messages: Vec<serde_json::Value>,
}

/// Build the AI context for a customer: active prompt plus recent history
async fn ai_context(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Query(query): Query<ContextQuery>,
) -> Result<Json<AiContextResponse>> {
    let customer = db::get_customer(&state.db, customer_id).await?;

    let prompt_key = AppCache::active_prompt_key();
    let prompt = if let Some(cached) = state.cache.prompts.get(&prompt_key).await {
        (*cached).clone()
    } else {
        let prompt = db::get_or_create_default_prompt(&state.db).await?;
        state
            .cache
            .prompts
            .insert(prompt_key, Arc::new(prompt.clone()))
            .await;
        prompt
    };

    let limit = query.limit.clamp(1, 50);
    let messages = db::get_recent_messages(&state.db, customer_id, limit).await?;

    Ok(Json(AiContextResponse {
        customer_id: customer.id,
        customer_name: customer.name.clone(),
        customer_identifier: customer.identifier(),
        system_prompt: prompt.system_prompt.clone(),
        messages: messages.iter().map(|m| m.ai_context(&customer)).collect(),
    }))
}

/// Chat API router
pub fn router() -> Router<AppState> {
    Router::new().route("/customers/:customer_id/ai-context", get(ai_context))
}
