//! Configuration for the chat module.

use std::path::PathBuf;
use std::time::Duration;

/// Gemini `generateContent` endpoint used by default.
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "TECHVIB_GEMINI_API_KEY";

/// File name of the local history slot.
pub const HISTORY_FILE: &str = "techvib_chat_history.json";

/// Configuration for the chat gateway and history storage.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Gemini `generateContent` endpoint.
    pub api_url: String,
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Path of the JSON file holding the conversation history.
    pub history_path: PathBuf,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: GEMINI_API_URL.to_string(),
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            history_path: PathBuf::from(HISTORY_FILE),
        }
    }
}

impl ChatConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Gemini endpoint.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the history slot path.
    #[must_use]
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ChatConfig::new()
            .with_api_url("http://localhost:8080/generate")
            .with_api_key("test-key")
            .with_timeout(Duration::from_secs(5))
            .with_history_path("/tmp/history.json");

        assert_eq!(config.api_url, "http://localhost:8080/generate");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.history_path, PathBuf::from("/tmp/history.json"));
    }
}
