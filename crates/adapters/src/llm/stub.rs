//! Stub completer for testing and offline mode

use async_trait::async_trait;
use trendpost_domain::{CompletionError, TextCompleter};

/// Stub completer that echoes the prompt or returns a fixed reply
pub struct StubCompleter {
    reply: Option<String>,
}

impl StubCompleter {
    /// Return every prompt unchanged
    pub fn echo() -> Self {
        Self { reply: None }
    }

    /// Return the same reply for every prompt
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }
}

impl Default for StubCompleter {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl TextCompleter for StubCompleter {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        Ok(self.reply.clone().unwrap_or_else(|| prompt.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_stub() {
        let completer = StubCompleter::echo();
        assert_eq!(completer.complete("same text").await.unwrap(), "same text");
    }

    #[tokio::test]
    async fn test_fixed_reply_stub() {
        let completer = StubCompleter::with_reply("canned");
        assert_eq!(completer.complete("anything").await.unwrap(), "canned");
    }
}
