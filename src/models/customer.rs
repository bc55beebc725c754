//! Customer model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Customer from customers.
///
/// A customer is identified by phone number and/or Telegram id; the phone
/// number is unique and always present.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub telegram_id: Option<i64>,
    pub telegram_username: Option<String>,
    pub is_active: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Primary identifier: Telegram id when linked, else the phone number.
    pub fn identifier(&self) -> String {
        match self.telegram_id {
            Some(id) => id.to_string(),
            None => self.phone_number.clone(),
        }
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.phone_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: "Anna K".to_string(),
            phone_number: "+66912345678".to_string(),
            telegram_id: None,
            telegram_username: None,
            is_active: true,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_identifier_prefers_telegram() {
        let mut c = customer();
        assert_eq!(c.identifier(), "+66912345678");

        c.telegram_id = Some(987654321);
        assert_eq!(c.identifier(), "987654321");
    }

    #[test]
    fn test_display_includes_phone() {
        assert_eq!(customer().to_string(), "Anna K (+66912345678)");
    }
}
