//! Follow-up recommendations from completed tasks.

use std::fmt::Write as _;
use std::sync::Arc;

use super::CompletionProvider;
use crate::core::extract_items;

/// Returned instead of calling the model when nothing is checked.
pub const NO_COMPLETED_TASKS_HINT: &str = "Check at least one task to get recommendations.";

/// Asks the model what to study next.
#[derive(Clone)]
pub struct ProgressAnalyzer {
    provider: Arc<dyn CompletionProvider>,
}

impl ProgressAnalyzer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Prompt listing the completed tasks.
    pub fn prompt(completed: &[String]) -> String {
        let mut prompt = String::from("Here is the list of tasks the user has completed:\n\n");
        for task in completed {
            let _ = writeln!(prompt, "- {task}");
        }
        prompt.push_str(
            "\nBased on this, suggest 3 next steps or assignments that will help the user \
             deepen their knowledge.",
        );
        prompt
    }

    /// Recommend next steps for `completed`.
    ///
    /// With nothing completed this returns [`NO_COMPLETED_TASKS_HINT`]
    /// without contacting the provider.
    pub async fn analyze(&self, completed: &[String]) -> anyhow::Result<Vec<String>> {
        if completed.is_empty() {
            tracing::debug!("No completed tasks, skipping analysis request");
            return Ok(vec![NO_COMPLETED_TASKS_HINT.to_string()]);
        }

        let reply = self.provider.complete(&Self::prompt(completed)).await?;
        let recommendations = extract_items(&reply);
        tracing::info!(
            completed = completed.len(),
            count = recommendations.len(),
            provider = self.provider.name(),
            "Analyzed progress"
        );
        Ok(recommendations)
    }
}
