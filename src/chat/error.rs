//! Error types for the chat module.

use thiserror::Error;

use super::types::MAX_MESSAGE_CHARS;

/// Errors surfaced by the chat controller and gateway.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The message was empty after trimming whitespace.
    #[error("message is empty")]
    EmptyMessage,

    /// The message exceeds the allowed input length.
    #[error("message exceeds {MAX_MESSAGE_CHARS} characters")]
    MessageTooLong,

    /// Another send is still in flight for this conversation.
    #[error("a previous message is still being sent")]
    SendInFlight,

    /// API key required but not configured.
    #[error("gemini api key is not configured")]
    ApiKeyMissing,

    /// The remote chat service failed. Transport errors, non-success
    /// responses and malformed payloads all collapse here.
    #[error("chat service error: {0}")]
    Gateway(String),
}

/// Errors from the persistent history store.
///
/// Always non-fatal: the controller logs these and keeps going. History loss
/// never blocks the conversation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing the history slot.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored history could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
