//! Chat assistant for the TechVib client.
//!
//! This module provides everything around the single chat conversation:
//! - The conversation controller (ordering, optimistic send, rollback)
//! - The Gemini `generateContent` gateway
//! - Durable history storage (one JSON slot on disk)

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod store;
pub mod types;

pub use config::ChatConfig;
pub use controller::ConversationController;
pub use error::{ChatError, StorageError};
pub use gateway::{ChatGateway, GeminiGateway};
pub use store::{HistoryStore, JsonFileHistoryStore, MemoryHistoryStore};
pub use types::{HistoryTurn, MAX_MESSAGE_CHARS, Message, Role};
