//! Types for the post feed.

use serde::{Deserialize, Serialize};

/// Author of a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Remote identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Handle.
    pub username: String,
    /// Contact email.
    pub email: String,
}

/// One post in the feed. Externally sourced and read-only; the whole list is
/// replaced on each successful fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Remote identifier.
    pub id: String,
    /// Post title.
    #[serde(default)]
    pub title: String,
    /// Post body.
    #[serde(default)]
    pub body: String,
    /// Post author, when the API provides one. The GraphQL schema calls
    /// this field `user`.
    #[serde(rename = "user")]
    pub author: Option<Author>,
}
