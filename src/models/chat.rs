//! Chat history models feeding the AI assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

use super::customer::Customer;

/// Platform a message arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "chat_platform", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatPlatform {
    Telegram,
    Whatsapp,
    Phone,
    Email,
    Other,
}

/// Direction of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "message_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Incoming,
    Outgoing,
    System,
}

/// Chat message from chat_messages.
///
/// Stored per customer and replayed as context when the assistant drafts a
/// reply. `context_summary` is an operator- or AI-written condensation used
/// instead of the full text when building long contexts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub platform: ChatPlatform,
    pub direction: MessageDirection,
    pub message_text: String,
    pub external_message_id: Option<String>,
    pub sender_name: Option<String>,
    pub context_summary: String,
    pub is_processed_by_ai: bool,
    pub ai_response: String,
    pub message_timestamp: DateTime<Utc>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Context document for the AI assistant.
    pub fn ai_context(&self, customer: &Customer) -> serde_json::Value {
        json!({
            "customer_name": customer.name,
            "customer_phone": customer.phone_number,
            "platform": self.platform,
            "direction": self.direction,
            "message_text": self.message_text,
            "context_summary": self.context_summary,
            "timestamp": self.message_timestamp.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ai_context_shape() {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: "Anna K".to_string(),
            phone_number: "+66912345678".to_string(),
            telegram_id: Some(42),
            telegram_username: Some("annak".to_string()),
            is_active: true,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let message = ChatMessage {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            platform: ChatPlatform::Telegram,
            direction: MessageDirection::Incoming,
            message_text: "Is the PCX free next week?".to_string(),
            external_message_id: Some("tg-1001".to_string()),
            sender_name: None,
            context_summary: "availability question".to_string(),
            is_processed_by_ai: false,
            ai_response: String::new(),
            message_timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
            metadata: json!({}),
            created_at: Utc::now(),
        };

        let ctx = message.ai_context(&customer);
        assert_eq!(ctx["customer_name"], "Anna K");
        assert_eq!(ctx["platform"], "telegram");
        assert_eq!(ctx["direction"], "incoming");
        assert_eq!(ctx["context_summary"], "availability question");
        assert_eq!(ctx["timestamp"], "2024-02-01T12:00:00+00:00");
    }
}
