//! Digest command - print the recent feed titles the generator would see

use anyhow::{Context, Result};
use std::path::PathBuf;
use trendpost_adapters::feed::HttpFeedSource;
use trendpost_domain::{SystemClock, usecases::DigestUseCase};

use crate::args::DigestArgs;
use crate::config::AppConfig;

pub async fn execute(args: DigestArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let feed = build_feed_source(&config)?;
    let usecase = DigestUseCase::new(&feed, &SystemClock, config.digest_config(args.window_hours));

    let digest = usecase
        .fetch_recent_topics()
        .await
        .with_context(|| format!("Failed to fetch feed {}", config.feed.url))?;

    if digest.is_empty() {
        tracing::info!("No entries inside the window");
    } else {
        println!("{}", digest);
    }

    Ok(())
}

pub(crate) fn build_feed_source(config: &AppConfig) -> Result<HttpFeedSource> {
    HttpFeedSource::new(config.feed.url.clone(), &config.feed.user_agent)
        .context("Failed to build feed HTTP client")
}
