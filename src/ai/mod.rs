//! Language-model integration.
//!
//! Generates practice tasks for a topic and follow-up recommendations from
//! completed tasks. Both go through a [`CompletionProvider`], which the
//! caller constructs and passes in.

mod analyzer;
mod generator;
mod openai;

pub use analyzer::{ProgressAnalyzer, NO_COMPLETED_TASKS_HINT};
pub use generator::TaskGenerator;
pub use openai::OpenAIProvider;

use async_trait::async_trait;

/// Trait for chat-completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a single user message and return the reply text.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// AI error types.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("No response from AI")]
    NoResponse,
}

#[cfg(test)]
pub(crate) mod testing {
    //! Providers for tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::CompletionProvider;

    /// Replies with a fixed text and records every prompt.
    #[derive(Debug, Default)]
    pub struct ScriptedProvider {
        reply: Option<String>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        pub fn replying(reply: &str) -> Self {
            Self { reply: Some(reply.to_string()), ..Self::default() }
        }

        /// A provider whose every call fails.
        pub fn failing() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or_else(|| anyhow::anyhow!("connection refused"))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }
}
