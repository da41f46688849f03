//! Post feed for the TechVib client.
//!
//! One fixed GraphQL query fetches the whole feed; a refresh replaces the
//! list wholesale. Posts are read-only and never mutated locally.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod types;

pub use config::FeedConfig;
pub use controller::{FeedController, FeedPhase};
pub use error::FeedError;
pub use gateway::fetch_posts;
pub use types::{Author, FeedItem};
