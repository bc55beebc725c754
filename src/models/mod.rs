//! Entity models backed by the rental schema

pub mod chat;
pub mod customer;
pub mod prompt;
pub mod rental;
pub mod scooter;

pub use chat::{ChatMessage, ChatPlatform, MessageDirection};
pub use customer::Customer;
pub use prompt::PromptTemplate;
pub use rental::{Rental, RentalStatus};
pub use scooter::{Scooter, ScooterMaintenance};
