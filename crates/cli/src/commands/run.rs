//! Run command - generate, review, and publish loop

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use trendpost_adapters::{
    linkedin::{LinkedInCredentials, LinkedInPublisher},
    llm::{ChatCompletionClient, StubCompleter},
};
use trendpost_domain::{
    SystemClock, TextCompleter,
    usecases::{InteractionLoop, LoopOutcome},
};

use crate::args::RunArgs;
use crate::commands::digest::build_feed_source;
use crate::config::AppConfig;
use crate::terminal::TerminalOperator;

pub async fn execute(args: RunArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    // Credentials are checked before any network call
    let credentials = config
        .linkedin_credentials()
        .context("LinkedIn credentials are not configured")?;

    let interaction_config = config.interaction_config(args.window_hours);

    tracing::info!(
        feed = %config.feed.url,
        window_hours = interaction_config.digest.window_hours,
        provider = %config.llm.provider,
        llm = %config.llm.base_url,
        "Starting trendpost run"
    );

    let feed = Arc::new(build_feed_source(&config)?);
    let completer = build_completer(&config)?;
    let publisher = Arc::new(build_publisher(&config, credentials)?);
    let operator = Arc::new(TerminalOperator::new());

    let run_loop = InteractionLoop::new(
        feed,
        completer,
        publisher,
        operator,
        Arc::new(SystemClock),
        interaction_config,
    );

    let report = run_loop.run().await.context("Post generation failed")?;

    match report.outcome {
        LoopOutcome::Published(receipt) => {
            tracing::info!(
                iterations = report.iterations,
                status = receipt.status_code,
                "Post published"
            );
        }
        LoopOutcome::PublishFailed(error) => {
            tracing::warn!(
                iterations = report.iterations,
                error = %error,
                "Run finished without publishing"
            );
        }
        LoopOutcome::Quit => {
            tracing::info!(iterations = report.iterations, "Run finished without posting");
        }
    }

    Ok(())
}

pub(crate) fn build_completer(config: &AppConfig) -> Result<Arc<dyn TextCompleter>> {
    match config.llm.provider.as_str() {
        "openai_compat" => {
            let base_url = config.llm.base_url.trim();
            if base_url.is_empty() {
                bail!("LLM base_url is required for provider openai_compat");
            }

            let client = ChatCompletionClient::new(base_url.to_string(), non_empty(&config.llm.model))
                .context("Failed to build completion HTTP client")?;
            Ok(Arc::new(client))
        }
        "stub" => match non_empty(&config.llm.stub_reply) {
            Some(reply) => Ok(Arc::new(StubCompleter::with_reply(reply))),
            None => Ok(Arc::new(StubCompleter::echo())),
        },
        other => bail!("Unknown LLM provider: {}", other),
    }
}

fn build_publisher(
    config: &AppConfig,
    credentials: LinkedInCredentials,
) -> Result<LinkedInPublisher> {
    LinkedInPublisher::with_base_url(
        credentials,
        config.linkedin.base_url.clone(),
        config.linkedin.api_version.clone(),
        config.linkedin.author_namespace.clone(),
    )
    .context("Failed to build LinkedIn HTTP client")
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
