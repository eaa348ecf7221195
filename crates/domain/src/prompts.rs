//! Prompt templates keyed by pipeline stage
//!
//! Templates are plain strings with two placeholders: `{source}` is replaced
//! with the feed label (e.g. `r/artificial`) and `{input}` with the stage input.

use std::fmt;

/// A stage of the generation pipeline that calls the completion model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptStage {
    Summarize,
    Draft,
    Proofread,
}

impl PromptStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Draft => "draft",
            Self::Proofread => "proofread",
        }
    }
}

impl fmt::Display for PromptStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_SUMMARIZE_TEMPLATE: &str = "Summarize the RSS feed of the subreddit {source}. \
The feed is provided below. The summary should be conversational.

{input}
";

pub const DEFAULT_DRAFT_TEMPLATE: &str = "RSS FEED SUMMARY of {source}

{input}

You are a LinkedIn Influencer. Given the summary of trending AI news above. \
Create an onbrand post for your followers. Do not use emojis.";

pub const DEFAULT_PROOFREAD_TEMPLATE: &str = "Proofread the following LinkedIn post. \
Ensure it is grammatically correct and on-brand. Do not use emojis. \
Ensure the post is professional and engaging. It should be suitable for a LinkedIn Influencer. \
It should not appear as programatically generated.

{input}
";

/// Prompt wording for each stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub summarize: String,
    pub draft: String,
    pub proofread: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            summarize: DEFAULT_SUMMARIZE_TEMPLATE.to_string(),
            draft: DEFAULT_DRAFT_TEMPLATE.to_string(),
            proofread: DEFAULT_PROOFREAD_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn template(&self, stage: PromptStage) -> &str {
        match stage {
            PromptStage::Summarize => &self.summarize,
            PromptStage::Draft => &self.draft,
            PromptStage::Proofread => &self.proofread,
        }
    }

    /// Fill a stage template.
    ///
    /// Placeholders appearing inside `source` or `input` are left as-is.
    pub fn render(&self, stage: PromptStage, source: &str, input: &str) -> String {
        self.template(stage)
            .replace("{input}", "\u{0}INPUT\u{0}")
            .replace("{source}", source)
            .replace("\u{0}INPUT\u{0}", input)
    }
}
