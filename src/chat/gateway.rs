//! Remote chat gateway backed by the Gemini `generateContent` API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::config::ChatConfig;
use super::error::ChatError;
use super::types::{HistoryTurn, Role};

/// Boxed future type for gateway operations.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One round trip to the remote chat model.
///
/// Implementations must forward `history` in the given order: it reflects
/// strict chronological order and must never be reordered upstream.
pub trait ChatGateway: Send + Sync {
    /// Send `message` together with the prior turns and return the reply
    /// text.
    ///
    /// # Errors
    /// Returns [`ChatError::Gateway`] on any transport error, non-success
    /// response or absent reply content.
    fn send(
        &self,
        message: String,
        history: Vec<HistoryTurn>,
    ) -> GatewayFuture<'_, Result<String, ChatError>>;
}

/// Gemini implementation of the chat gateway.
pub struct GeminiGateway {
    client: reqwest::Client,
    config: ChatConfig,
}

impl GeminiGateway {
    /// Create a gateway from the given configuration.
    ///
    /// # Errors
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be built.
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        if config.api_key.is_empty() {
            return Err(ChatError::ApiKeyMissing);
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ChatError::Gateway(format!("failed to build http client: {e}")))?;

        Ok(Self { client, config })
    }
}

impl ChatGateway for GeminiGateway {
    fn send(
        &self,
        message: String,
        history: Vec<HistoryTurn>,
    ) -> GatewayFuture<'_, Result<String, ChatError>> {
        Box::pin(async move {
            let url = build_url(&self.config)?;
            let body = GenerateRequest {
                contents: build_contents(&message, &history),
            };

            let response = self
                .client
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(|e| ChatError::Gateway(format!("request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                // Prefer the upstream error message when the body parses.
                let detail = response
                    .json::<ApiErrorBody>()
                    .await
                    .ok()
                    .and_then(|body| body.error)
                    .map_or_else(|| format!("unexpected status {status}"), |e| e.message);
                return Err(ChatError::Gateway(detail));
            }

            let parsed: GenerateResponse = response
                .json()
                .await
                .map_err(|e| ChatError::Gateway(format!("malformed response: {e}")))?;

            extract_reply(parsed)
                .ok_or_else(|| ChatError::Gateway("response contained no reply text".to_string()))
        })
    }
}

/// Build the endpoint URL with the API key query parameter.
fn build_url(config: &ChatConfig) -> Result<url::Url, ChatError> {
    let mut url = url::Url::parse(&config.api_url)
        .map_err(|e| ChatError::Gateway(format!("invalid endpoint url: {e}")))?;
    url.query_pairs_mut().append_pair("key", &config.api_key);
    Ok(url)
}

/// Map a conversation role onto the wire role Gemini expects.
const fn gemini_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Bot => "model",
    }
}

/// Build the `contents` array: prior turns in original order, then the new
/// user message last.
fn build_contents(message: &str, history: &[HistoryTurn]) -> Vec<Content> {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| Content {
            role: gemini_role(turn.role),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        })
        .collect();

    contents.push(Content {
        role: gemini_role(Role::User),
        parts: vec![Part {
            text: message.to_string(),
        }],
    });

    contents
}

/// Pull `candidates[0].content.parts[0].text` out of a response.
fn extract_reply(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .into_iter()
        .flatten()
        .next()
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_keep_history_order_and_map_roles() {
        let history = vec![
            HistoryTurn {
                role: Role::User,
                text: "hi".to_string(),
            },
            HistoryTurn {
                role: Role::Bot,
                text: "hello!".to_string(),
            },
        ];

        let contents = build_contents("how are you?", &history);

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[0].parts[0].text, "hi");
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[1].parts[0].text, "hello!");
        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[2].parts[0].text, "how are you?");
    }

    #[test]
    fn test_extract_reply_happy_path() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "hello!" } ] } }
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_reply(response).as_deref(), Some("hello!"));
    }

    #[test]
    fn test_extract_reply_missing_text() {
        let raw = r#"{ "candidates": [ { "content": { "parts": [] } } ] }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(extract_reply(response).is_none());

        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_reply(response).is_none());
    }

    #[test]
    fn test_build_url_appends_key() {
        let config = ChatConfig::new()
            .with_api_url("https://example.com/v1/generate")
            .with_api_key("abc123");
        let url = build_url(&config).unwrap();
        assert_eq!(url.as_str(), "https://example.com/v1/generate?key=abc123");
    }

    #[test]
    fn test_gateway_requires_api_key() {
        let config = ChatConfig::new().with_api_key("");
        assert!(matches!(
            GeminiGateway::new(config),
            Err(ChatError::ApiKeyMissing)
        ));
    }
}
