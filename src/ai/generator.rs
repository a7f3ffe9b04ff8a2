//! Practice-task generation.

use std::sync::Arc;

use super::CompletionProvider;
use crate::core::extract_items;

/// Asks the model for practice tasks on a topic.
#[derive(Clone)]
pub struct TaskGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl TaskGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Prompt sent for a topic.
    pub fn prompt(topic: &str) -> String {
        format!("Generate 5 practical tasks on the topic '{topic}' to study.")
    }

    /// Generate tasks for `topic`.
    ///
    /// The topic is not validated here. The reply is split into items; the
    /// prompt asks for five but any count is returned as-is.
    pub async fn generate(&self, topic: &str) -> anyhow::Result<Vec<String>> {
        let reply = self.provider.complete(&Self::prompt(topic)).await?;
        let tasks = extract_items(&reply);
        tracing::info!(topic, count = tasks.len(), provider = self.provider.name(), "Generated tasks");
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedProvider;

    #[test]
    fn test_generate_parses_numbered_reply() {
        let provider = Arc::new(ScriptedProvider::replying("1. Learn loops\n2. Learn functions"));
        let generator = TaskGenerator::new(provider.clone());

        let tasks = tokio_test::block_on(generator.generate("Python")).unwrap();

        assert_eq!(tasks, vec!["Learn loops", "Learn functions"]);
        assert_eq!(provider.calls(), 1);
        assert!(provider.last_prompt().unwrap().contains("'Python'"));
    }

    #[test]
    fn test_generate_does_not_cap_count() {
        let reply = (1..=8).map(|i| format!("{i}. Task {i}x")).collect::<Vec<_>>().join("\n");
        let generator = TaskGenerator::new(Arc::new(ScriptedProvider::replying(&reply)));

        let tasks = tokio_test::block_on(generator.generate("Go")).unwrap();
        assert_eq!(tasks.len(), 8);
        assert_eq!(tasks[0], "Task 1x");
    }

    #[test]
    fn test_generate_propagates_errors() {
        let generator = TaskGenerator::new(Arc::new(ScriptedProvider::failing()));
        let err = tokio_test::block_on(generator.generate("Python")).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
