//! Interaction loop use case - generate a post, show it, and act on the operator's choice
//!
//! The loop is an explicit state machine. Every pipeline stage is one
//! transition, so a run can be driven step by step in tests:
//!
//! ```text
//! Fetching -> Summarizing -> Drafting -> SanitizingDraft -> Proofreading
//!   -> SanitizingProofread -> AwaitingDecision
//!   -> Posting     -> Done
//!   -> Quitting    -> Done
//!   -> Regenerating -> Fetching
//! ```

use std::sync::Arc;

use crate::{
    model::{Digest, DraftPost, PublishReceipt, SanitizedPost, UserDecision},
    ports::{
        Clock, CompletionError, FeedError, FeedSource, Operator, OperatorError, PublishError,
        Publisher, TextCompleter,
    },
    prompts::{PromptStage, PromptTemplates},
    usecases::digest::{DigestConfig, DigestUseCase},
};

pub const DEFAULT_DECISION_PROMPT: &str =
    "\nPress 'p' to post to LinkedIn, 'r' to regenerate, or 'q' to quit: ";

/// Configuration for the interaction loop
#[derive(Debug, Clone)]
pub struct InteractionConfig {
    /// Label substituted for `{source}` in prompts (e.g. "r/artificial")
    pub source_label: String,
    /// Digest settings
    pub digest: DigestConfig,
    /// Prompt wording per stage
    pub templates: PromptTemplates,
    /// Question shown when asking for a decision
    pub decision_prompt: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            source_label: "r/artificial".to_string(),
            digest: DigestConfig::default(),
            templates: PromptTemplates::default(),
            decision_prompt: DEFAULT_DECISION_PROMPT.to_string(),
        }
    }
}

/// How a finished loop ended
#[derive(Debug)]
pub enum LoopOutcome {
    /// The post was accepted by the publishing endpoint
    Published(PublishReceipt),
    /// Publishing was attempted and failed; the run still ends normally
    PublishFailed(PublishError),
    /// The operator quit without posting
    Quit,
}

/// Summary of a completed loop
#[derive(Debug)]
pub struct LoopReport {
    pub outcome: LoopOutcome,
    /// Number of generation passes (1 + regenerations)
    pub iterations: usize,
}

/// A state of the interaction loop, carrying the data produced so far
#[derive(Debug)]
pub enum LoopState {
    Fetching,
    Summarizing { digest: Digest },
    Drafting { summary: String },
    SanitizingDraft { draft: DraftPost },
    Proofreading { clean: SanitizedPost },
    SanitizingProofread { proofread: DraftPost },
    AwaitingDecision { post: SanitizedPost },
    Posting { post: SanitizedPost },
    Regenerating,
    Quitting,
    Done(LoopOutcome),
}

impl LoopState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Summarizing { .. } => "summarizing",
            Self::Drafting { .. } => "drafting",
            Self::SanitizingDraft { .. } => "sanitizing_draft",
            Self::Proofreading { .. } => "proofreading",
            Self::SanitizingProofread { .. } => "sanitizing_proofread",
            Self::AwaitingDecision { .. } => "awaiting_decision",
            Self::Posting { .. } => "posting",
            Self::Regenerating => "regenerating",
            Self::Quitting => "quitting",
            Self::Done(_) => "done",
        }
    }
}

/// Errors that end the loop early
#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("Completion failed during {stage}: {source}")]
    Completion {
        stage: PromptStage,
        #[source]
        source: CompletionError,
    },
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),
}

/// Interaction loop orchestrator
pub struct InteractionLoop<S, T, P, O, Cl>
where
    S: FeedSource + ?Sized,
    T: TextCompleter + ?Sized,
    P: Publisher + ?Sized,
    O: Operator + ?Sized,
    Cl: Clock + ?Sized,
{
    feed: Arc<S>,
    completer: Arc<T>,
    publisher: Arc<P>,
    operator: Arc<O>,
    clock: Arc<Cl>,
    config: InteractionConfig,
}

impl<S, T, P, O, Cl> InteractionLoop<S, T, P, O, Cl>
where
    S: FeedSource + ?Sized,
    T: TextCompleter + ?Sized,
    P: Publisher + ?Sized,
    O: Operator + ?Sized,
    Cl: Clock + ?Sized,
{
    pub fn new(
        feed: Arc<S>,
        completer: Arc<T>,
        publisher: Arc<P>,
        operator: Arc<O>,
        clock: Arc<Cl>,
        config: InteractionConfig,
    ) -> Self {
        Self {
            feed,
            completer,
            publisher,
            operator,
            clock,
            config,
        }
    }

    /// Run from `Fetching` until the operator posts or quits
    pub async fn run(&self) -> Result<LoopReport, InteractionError> {
        let mut state = LoopState::Fetching;
        let mut iterations = 0;

        loop {
            if matches!(state, LoopState::Fetching) {
                iterations += 1;
                tracing::info!(iteration = iterations, "Generating post");
            }

            state = self.step(state).await?;

            if let LoopState::Done(outcome) = state {
                return Ok(LoopReport {
                    outcome,
                    iterations,
                });
            }
        }
    }

    /// Perform one transition
    pub async fn step(&self, state: LoopState) -> Result<LoopState, InteractionError> {
        tracing::debug!(state = state.name(), "Loop transition");

        let next = match state {
            LoopState::Fetching => {
                let digest = DigestUseCase::new(
                    self.feed.as_ref(),
                    self.clock.as_ref(),
                    self.config.digest.clone(),
                )
                .fetch_recent_topics()
                .await?;
                LoopState::Summarizing { digest }
            }
            LoopState::Summarizing { digest } => {
                let summary = self
                    .complete(PromptStage::Summarize, digest.as_str())
                    .await?;
                LoopState::Drafting { summary }
            }
            LoopState::Drafting { summary } => {
                let draft = self.complete(PromptStage::Draft, &summary).await?;
                LoopState::SanitizingDraft {
                    draft: DraftPost(draft),
                }
            }
            LoopState::SanitizingDraft { draft } => LoopState::Proofreading {
                clean: SanitizedPost::from_draft(&draft),
            },
            LoopState::Proofreading { clean } => {
                let proofread = self
                    .complete(PromptStage::Proofread, clean.as_str())
                    .await?;
                LoopState::SanitizingProofread {
                    proofread: DraftPost(proofread),
                }
            }
            LoopState::SanitizingProofread { proofread } => LoopState::AwaitingDecision {
                post: SanitizedPost::from_draft(&proofread),
            },
            LoopState::AwaitingDecision { post } => {
                self.operator.present(&post).await?;

                let decision = match self.operator.ask(&self.config.decision_prompt).await? {
                    Some(line) => UserDecision::parse(&line),
                    None => {
                        tracing::warn!("Input closed, quitting");
                        UserDecision::Quit
                    }
                };

                tracing::debug!(decision = ?decision, "Operator decided");

                match decision {
                    UserDecision::Post => LoopState::Posting { post },
                    UserDecision::Regenerate => LoopState::Regenerating,
                    UserDecision::Quit => LoopState::Quitting,
                }
            }
            LoopState::Posting { post } => LoopState::Done(self.post(&post).await?),
            LoopState::Regenerating => LoopState::Fetching,
            LoopState::Quitting => {
                self.operator.notify("Exiting without posting.").await?;
                LoopState::Done(LoopOutcome::Quit)
            }
            done @ LoopState::Done(_) => done,
        };

        Ok(next)
    }

    async fn complete(&self, stage: PromptStage, input: &str) -> Result<String, InteractionError> {
        let prompt = self
            .config
            .templates
            .render(stage, &self.config.source_label, input);

        tracing::info!(stage = %stage, prompt_len = prompt.len(), "Requesting completion");

        let text = self
            .completer
            .complete(&prompt)
            .await
            .map_err(|source| InteractionError::Completion { stage, source })?;

        tracing::debug!(stage = %stage, response_len = text.len(), "Completion received");
        Ok(text)
    }

    async fn post(&self, post: &SanitizedPost) -> Result<LoopOutcome, InteractionError> {
        let platform = self.publisher.platform();

        match self.publisher.publish(post).await {
            Ok(receipt) => {
                tracing::info!(
                    platform = platform,
                    status = receipt.status_code,
                    "Published post"
                );
                self.operator
                    .notify(&format!("Status Code: {}", receipt.status_code))
                    .await?;
                self.operator
                    .notify(&format!("Response: {}", receipt.body))
                    .await?;
                Ok(LoopOutcome::Published(receipt))
            }
            Err(e) => {
                tracing::error!(platform = platform, error = %e, "Failed to publish post");
                Ok(LoopOutcome::PublishFailed(e))
            }
        }
    }
}
