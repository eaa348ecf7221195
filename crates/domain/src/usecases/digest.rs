//! Digest use case - turns the raw feed into a list of recent topics

use time::{Duration, OffsetDateTime};

use crate::{
    model::{Digest, FeedEntry},
    ports::{Clock, FeedError, FeedSource},
};

/// Configuration for digest building
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Trailing window, in hours, of entries to keep
    pub window_hours: u32,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self { window_hours: 12 }
    }
}

/// Join the titles of entries published at or after `now - window`.
///
/// Feed order is preserved; entries are not sorted. A window reaching past
/// the earliest representable date keeps every entry.
pub fn build_digest(entries: &[FeedEntry], now: OffsetDateTime, window: Duration) -> Digest {
    let cutoff = now.checked_sub(window);

    let titles: Vec<&str> = entries
        .iter()
        .filter(|entry| cutoff.is_none_or(|cutoff| entry.published_at >= cutoff))
        .map(|entry| entry.title.as_str())
        .collect();

    Digest::new(titles.join("\n"))
}

/// Use case for fetching recent topics from a feed
pub struct DigestUseCase<'a, S: FeedSource + ?Sized, C: Clock + ?Sized> {
    source: &'a S,
    clock: &'a C,
    config: DigestConfig,
}

impl<'a, S: FeedSource + ?Sized, C: Clock + ?Sized> DigestUseCase<'a, S, C> {
    pub fn new(source: &'a S, clock: &'a C, config: DigestConfig) -> Self {
        Self {
            source,
            clock,
            config,
        }
    }

    /// Fetch the feed and keep the titles inside the configured window
    pub async fn fetch_recent_topics(&self) -> Result<Digest, FeedError> {
        let entries = self.source.fetch_entries().await?;
        let window = Duration::hours(i64::from(self.config.window_hours));
        let digest = build_digest(&entries, self.clock.now(), window);

        tracing::info!(
            entries = entries.len(),
            recent = digest.topic_count(),
            window_hours = self.config.window_hours,
            "Built feed digest"
        );

        Ok(digest)
    }
}
