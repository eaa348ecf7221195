//! Pipeline entities and value objects

use std::fmt;

use time::OffsetDateTime;

/// A single entry parsed from the subreddit feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Entry title as published in the feed
    pub title: String,
    /// When the entry was published
    pub published_at: OffsetDateTime,
}

/// Newline-joined titles of recent feed entries, in feed order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Digest(String);

impl Digest {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of titles in the digest
    pub fn topic_count(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.lines().count()
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw model output for a candidate post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPost(pub String);

/// Post text after sanitizing; the only text handed to a publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPost(String);

impl SanitizedPost {
    /// Sanitize a draft. This is the only way to build a `SanitizedPost`.
    pub fn from_draft(draft: &DraftPost) -> Self {
        Self(crate::sanitize::sanitize(&draft.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the operator chose to do with a generated post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDecision {
    Post,
    Regenerate,
    Quit,
}

impl UserDecision {
    /// Interpret a line of operator input.
    ///
    /// Input is trimmed and lowercased; `p` posts, `q` quits and anything
    /// else (including an empty line) regenerates.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "p" => Self::Post,
            "q" => Self::Quit,
            _ => Self::Regenerate,
        }
    }
}

/// Response from the publishing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body, not parsed
    pub body: String,
}
