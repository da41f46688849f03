//! Types for the chat conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a user message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user.
    User,
    /// Reply produced by the assistant.
    Bot,
}

/// One turn in the conversation.
///
/// `id` is a per-conversation sequence number: within a conversation the log
/// is ordered by strictly increasing `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Sequence number within the conversation.
    pub id: u64,
    /// Message content. Never empty.
    pub text: String,
    /// Author of the message.
    pub role: Role,
    /// Creation time, serialized as ISO-8601.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time.
    #[must_use]
    pub fn new(id: u64, role: Role, text: String) -> Self {
        Self {
            id,
            text,
            role,
            timestamp: Utc::now(),
        }
    }
}

/// A prior message reduced to what the chat gateway needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    /// Author of the turn.
    pub role: Role,
    /// Turn content.
    pub text: String,
}

impl From<&Message> for HistoryTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            text: message.text.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_message_json_round_trip() {
        let message = Message::new(3, Role::Bot, "hello!".to_string());
        let json = serde_json::to_string(&message).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn test_history_turn_from_message() {
        let message = Message::new(1, Role::User, "hi".to_string());
        let turn = HistoryTurn::from(&message);
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "hi");
    }
}
