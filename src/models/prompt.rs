//! Prompt template model for the AI assistant

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Name of the prompt created when no template exists yet
pub const DEFAULT_PROMPT_NAME: &str = "Standard rental consultant";

/// System prompt body for the default template
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a professional rental consultant for motorbikes and scooters.

Your tasks:
- Help customers pick a suitable scooter
- Give accurate pricing and rental terms
- Take the customer's chat history into account
- Stay friendly and professional
- Offer several scooter options when available";

/// Prompt template from prompt_templates.
///
/// At most one template is active at a time; the active one is what the
/// assistant uses by default.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_active {
            write!(f, "{} (active)", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_marks_active() {
        let mut prompt = PromptTemplate {
            id: Uuid::new_v4(),
            name: "Greeting".to_string(),
            description: String::new(),
            system_prompt: "Hi".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(prompt.to_string(), "Greeting (active)");

        prompt.is_active = false;
        assert_eq!(prompt.to_string(), "Greeting");
    }
}
