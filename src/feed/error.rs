//! Error types for the feed module.

use thiserror::Error;

/// Errors that can occur while fetching the feed.
///
/// Transport failures and API-level errors are surfaced through this one
/// type; the presentation layer shows them uniformly with a retry prompt.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The GraphQL endpoint reported an error.
    #[error("api error: {0}")]
    Api(String),

    /// The response carried neither posts nor an error.
    #[error("no posts data received")]
    MissingData,
}
