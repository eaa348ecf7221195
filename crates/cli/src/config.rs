//! Configuration loading and management

use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trendpost_adapters::{feed, linkedin, linkedin::LinkedInCredentials, llm};
use trendpost_domain::{
    PromptTemplates,
    prompts::{DEFAULT_DRAFT_TEMPLATE, DEFAULT_PROOFREAD_TEMPLATE, DEFAULT_SUMMARIZE_TEMPLATE},
    usecases::{DigestConfig, InteractionConfig},
};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub prompts: PromptsConfig,

    #[serde(default)]
    pub linkedin: LinkedInConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,

    #[serde(default = "default_feed_label")]
    pub label: String,

    #[serde(default = "default_window_hours")]
    pub window_hours: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub model: Option<String>,

    /// Fixed reply for the `stub` provider; it echoes the prompt when unset
    #[serde(default)]
    pub stub_reply: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default = "default_summarize_prompt")]
    pub summarize: String,

    #[serde(default = "default_draft_prompt")]
    pub draft: String,

    #[serde(default = "default_proofread_prompt")]
    pub proofread: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInConfig {
    #[serde(default = "default_linkedin_base_url")]
    pub base_url: String,

    #[serde(default = "default_linkedin_api_version")]
    pub api_version: String,

    #[serde(default = "default_author_namespace")]
    pub author_namespace: String,

    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,

    #[serde(default = "default_user_id_env")]
    pub user_id_env: String,
}

// Default value functions
fn default_feed_url() -> String {
    feed::DEFAULT_FEED_URL.to_string()
}

fn default_feed_label() -> String {
    "r/artificial".to_string()
}

fn default_window_hours() -> u32 {
    DigestConfig::default().window_hours
}

fn default_user_agent() -> String {
    feed::DEFAULT_USER_AGENT.to_string()
}

fn default_provider() -> String {
    "openai_compat".to_string()
}

fn default_llm_base_url() -> String {
    llm::chat::DEFAULT_BASE_URL.to_string()
}

fn default_summarize_prompt() -> String {
    DEFAULT_SUMMARIZE_TEMPLATE.to_string()
}

fn default_draft_prompt() -> String {
    DEFAULT_DRAFT_TEMPLATE.to_string()
}

fn default_proofread_prompt() -> String {
    DEFAULT_PROOFREAD_TEMPLATE.to_string()
}

fn default_linkedin_base_url() -> String {
    linkedin::DEFAULT_BASE_URL.to_string()
}

fn default_linkedin_api_version() -> String {
    linkedin::DEFAULT_API_VERSION.to_string()
}

fn default_author_namespace() -> String {
    linkedin::DEFAULT_AUTHOR_NAMESPACE.to_string()
}

fn default_access_token_env() -> String {
    "LINKEDIN_ACCESS_TOKEN".to_string()
}

fn default_user_id_env() -> String {
    "LINKEDIN_USER_ID".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            label: default_feed_label(),
            window_hours: default_window_hours(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_llm_base_url(),
            model: None,
            stub_reply: None,
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            summarize: default_summarize_prompt(),
            draft: default_draft_prompt(),
            proofread: default_proofread_prompt(),
        }
    }
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            base_url: default_linkedin_base_url(),
            api_version: default_linkedin_api_version(),
            author_namespace: default_author_namespace(),
            access_token_env: default_access_token_env(),
            user_id_env: default_user_id_env(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./trendpost.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("TRENDPOST")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn prompt_templates(&self) -> PromptTemplates {
        PromptTemplates {
            summarize: self.prompts.summarize.clone(),
            draft: self.prompts.draft.clone(),
            proofread: self.prompts.proofread.clone(),
        }
    }

    pub fn digest_config(&self, window_override: Option<u32>) -> DigestConfig {
        DigestConfig {
            window_hours: window_override.unwrap_or(self.feed.window_hours),
        }
    }

    pub fn interaction_config(&self, window_override: Option<u32>) -> InteractionConfig {
        InteractionConfig {
            source_label: self.feed.label.clone(),
            digest: self.digest_config(window_override),
            templates: self.prompt_templates(),
            ..Default::default()
        }
    }

    /// Read the LinkedIn access token and member id from the environment
    pub fn linkedin_credentials(&self) -> Result<LinkedInCredentials> {
        let access_token = load_setting(&self.linkedin.access_token_env, "LinkedIn access token")?;
        let user_id = load_setting(&self.linkedin.user_id_env, "LinkedIn user id")?;

        Ok(LinkedInCredentials {
            access_token: SecretString::new(access_token.into()),
            user_id,
        })
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# trendpost configuration
#
# Every key can be overridden from the environment, e.g.
#   TRENDPOST__LLM__BASE_URL=http://localhost:8080/v1

[feed]
url = "https://www.reddit.com/r/artificial/.rss"
label = "r/artificial"
window_hours = 12
# Reddit rejects requests without a descriptive user agent.
# Defaults to "trendpost/<version>".
# user_agent = "my-bot/1.0 (by u/your_name)"

[llm]
provider = "openai_compat"  # openai_compat, stub
base_url = "http://localhost:1234/v1"
# model = "qwen2.5-7b-instruct"
# Only read by the stub provider; without it the stub echoes each prompt
# stub_reply = "A canned post for offline runs"

# Prompt templates: {source} is the feed label, {input} the stage input.
# [prompts]
# summarize = """Summarize the RSS feed of the subreddit {source}.
#
# {input}
# """

[linkedin]
base_url = "https://api.linkedin.com"
api_version = "202306"
author_namespace = "li"
# Names of the environment variables holding the credentials.
# They may also be set in a .env file in the working directory.
access_token_env = "LINKEDIN_ACCESS_TOKEN"
user_id_env = "LINKEDIN_USER_ID"
"#
        .to_string()
    }
}

fn load_setting(env_var: &str, what: &str) -> Result<String> {
    if env_var.trim().is_empty() {
        bail!("No env var configured for {}", what);
    }

    let value = std::env::var(env_var)
        .with_context(|| format!("Environment variable {} must be set ({})", env_var, what))?;

    if value.trim().is_empty() {
        bail!("Environment variable {} is empty ({})", env_var, what);
    }

    Ok(value.trim().to_string())
}
