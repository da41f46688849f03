//! Feed controller: the in-memory post list and its loading state.

use super::config::FeedConfig;
use super::error::FeedError;
use super::gateway;
use super::types::FeedItem;

/// Where the feed currently stands, for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedPhase {
    /// First load, nothing to show yet.
    Loading,
    /// A load succeeded; the list is current.
    Ready,
    /// Refreshing while the stale list stays visible.
    Refreshing,
    /// The last load failed; retry is a new `load` call.
    Failed(String),
}

/// Owns the post list. Each successful load replaces the list wholesale;
/// there is no incremental merge.
pub struct FeedController {
    client: reqwest::Client,
    config: FeedConfig,
    posts: Vec<FeedItem>,
    phase: FeedPhase,
}

impl FeedController {
    /// Create a controller; no fetch happens until [`load`](Self::load).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            posts: Vec::new(),
            phase: FeedPhase::Loading,
        })
    }

    /// Fetch the feed and replace the post list atomically.
    ///
    /// # Errors
    /// Returns the fetch failure; the previous list stays visible and the
    /// phase records the error message.
    pub async fn load(&mut self) -> Result<&[FeedItem], FeedError> {
        self.phase = if self.posts.is_empty() {
            FeedPhase::Loading
        } else {
            FeedPhase::Refreshing
        };

        match gateway::fetch_posts(&self.client, &self.config).await {
            Ok(posts) => {
                tracing::debug!("feed loaded: {} posts", posts.len());
                self.posts = posts;
                self.phase = FeedPhase::Ready;
                Ok(&self.posts)
            }
            Err(err) => {
                self.phase = FeedPhase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Refresh the feed. Same contract as [`load`](Self::load).
    ///
    /// # Errors
    /// Returns the fetch failure.
    pub async fn refresh(&mut self) -> Result<&[FeedItem], FeedError> {
        self.load().await
    }

    /// Current post list.
    #[must_use]
    pub fn posts(&self) -> &[FeedItem] {
        &self.posts
    }

    /// Current loading state.
    #[must_use]
    pub const fn phase(&self) -> &FeedPhase {
        &self.phase
    }
}
