//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the pipeline and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::{FeedEntry, PublishReceipt, SanitizedPost};

/// Error type for feed source operations
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Feed returned HTTP {status}")]
    Http { status: u16 },
    #[error("Failed to parse feed XML: {0}")]
    Parse(String),
    #[error("Feed has no `{0}` element")]
    MissingElement(&'static str),
}

/// Port for fetching entries from a subreddit feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch all entries currently in the feed, in feed order
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>, FeedError>;
}

/// Error type for text completion operations
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion endpoint unreachable: {0}")]
    Network(String),
    #[error("Completion endpoint returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

/// Port for a text completion model
#[async_trait]
pub trait TextCompleter: Send + Sync {
    /// Send a single user prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Error type for publisher operations
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Publish rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Port for publishing a finished post
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish the post and return the endpoint's raw response
    async fn publish(&self, post: &SanitizedPost) -> Result<PublishReceipt, PublishError>;

    /// Get the platform name (e.g., "linkedin")
    fn platform(&self) -> &'static str;
}

/// Error type for operator interaction
#[derive(Debug, Error)]
pub enum OperatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for the human in the loop: shows posts, reads decisions, reports status
#[async_trait]
pub trait Operator: Send + Sync {
    /// Show a generated post
    async fn present(&self, post: &SanitizedPost) -> Result<(), OperatorError>;

    /// Ask a question and read one line of input. `None` means input is closed.
    async fn ask(&self, question: &str) -> Result<Option<String>, OperatorError>;

    /// Show a status line
    async fn notify(&self, message: &str) -> Result<(), OperatorError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
