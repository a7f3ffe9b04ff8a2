//! Session state for one run of the task tool.
//!
//! Everything the user sees lives in [`SessionState`]: the current task set,
//! the latest analysis and the analysis history. State changes only through
//! [`SessionState::apply`], which takes an [`Event`] and returns the next
//! state. Calls to the language model happen outside; their results come in
//! as events.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single practice task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// What to do
    pub description: String,
    /// Whether the user checked it off
    pub done: bool,
}

impl Task {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), done: false }
    }
}

/// Ordered tasks generated for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSet {
    /// Topic the tasks were generated for
    pub topic: String,
    /// Tasks, keyed by position
    pub tasks: Vec<Task>,
}

impl TaskSet {
    /// Build a fresh set with nothing checked.
    pub fn new(topic: impl Into<String>, descriptions: Vec<String>) -> Self {
        Self { topic: topic.into(), tasks: descriptions.into_iter().map(Task::new).collect() }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Descriptions in order.
    pub fn descriptions(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.description.clone()).collect()
    }

    /// Descriptions of checked tasks, in task order.
    pub fn completed(&self) -> Vec<String> {
        self.tasks.iter().filter(|t| t.done).map(|t| t.description.clone()).collect()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// Share of checked tasks, floored to a whole percent.
    pub fn completion_percent(&self) -> u32 {
        completion_percent(self.completed_count(), self.len())
    }
}

/// `completed / total` as a floored percentage; 0 when there are no tasks.
pub fn completion_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed.min(total) * 100 / total) as u32
}

/// A snapshot taken by one "analyze" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisEntry {
    /// Tasks that were checked at analysis time
    pub done: Vec<String>,
    /// Completion percentage at analysis time, never recomputed
    pub percent: u32,
    /// Follow-up suggestions from the model
    pub recommendations: Vec<String>,
    /// When the analysis finished
    pub taken_at: DateTime<Local>,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The topic input changed
    TopicChanged(String),
    /// The model returned tasks for a topic
    TasksGenerated { topic: String, tasks: Vec<String> },
    /// Task generation failed
    GenerationFailed(String),
    /// The user toggled the task at this position
    TaskToggled(usize),
    /// The model returned recommendations for an analysis
    AnalysisCompleted(AnalysisEntry),
    /// The analysis request failed
    AnalysisFailed(String),
}

/// Everything shown on screen, minus presentation details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Contents of the topic input
    pub topic: String,
    /// Current task set, if any has been generated
    pub task_set: Option<TaskSet>,
    /// Append-only analysis history
    pub history: Vec<AnalysisEntry>,
    /// Inline error from the last generation attempt
    pub generation_error: Option<String>,
    /// Inline error from the last analysis attempt
    pub analysis_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topic to generate for, if the input holds anything besides whitespace.
    pub fn pending_topic(&self) -> Option<&str> {
        let topic = self.topic.trim();
        (!topic.is_empty()).then_some(topic)
    }

    /// Task set, if it holds at least one task.
    pub fn active_tasks(&self) -> Option<&TaskSet> {
        self.task_set.as_ref().filter(|set| !set.is_empty())
    }

    /// The most recent analysis, shown as the current progress summary.
    pub fn latest_analysis(&self) -> Option<&AnalysisEntry> {
        self.history.last()
    }

    /// Apply an event and return the next state.
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::TopicChanged(topic) => {
                self.topic = topic;
            }
            Event::TasksGenerated { topic, tasks } => {
                // A new set replaces the old one and starts unchecked.
                self.task_set = Some(TaskSet::new(topic, tasks));
                self.generation_error = None;
            }
            Event::GenerationFailed(message) => {
                self.generation_error = Some(message);
            }
            Event::TaskToggled(index) => {
                if let Some(task) = self.task_set.as_mut().and_then(|set| set.tasks.get_mut(index))
                {
                    task.done = !task.done;
                }
            }
            Event::AnalysisCompleted(entry) => {
                self.history.push(entry);
                self.analysis_error = None;
            }
            Event::AnalysisFailed(message) => {
                self.analysis_error = Some(message);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(state: SessionState, topic: &str, tasks: &[&str]) -> SessionState {
        state.apply(Event::TasksGenerated {
            topic: topic.to_string(),
            tasks: tasks.iter().map(|s| (*s).to_string()).collect(),
        })
    }

    fn entry(percent: u32, recommendation: &str) -> AnalysisEntry {
        AnalysisEntry {
            done: vec!["a".to_string()],
            percent,
            recommendations: vec![recommendation.to_string()],
            taken_at: Local::now(),
        }
    }

    #[test]
    fn test_completion_percent_floors() {
        assert_eq!(completion_percent(1, 4), 25);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 66);
        assert_eq!(completion_percent(29, 100), 29);
        assert_eq!(completion_percent(5, 5), 100);
        assert_eq!(completion_percent(0, 0), 0);
    }

    #[test]
    fn test_one_of_four_is_25_percent() {
        let state = generated(SessionState::new(), "Python", &["a", "b", "c", "d"]);
        let state = state.apply(Event::TaskToggled(2));

        let set = state.active_tasks().unwrap();
        assert_eq!(set.completion_percent(), 25);
        assert_eq!(set.completed(), vec!["c"]);
    }

    #[test]
    fn test_toggle_twice_unchecks() {
        let state = generated(SessionState::new(), "Python", &["a", "b"]);
        let state = state.apply(Event::TaskToggled(0)).apply(Event::TaskToggled(0));
        assert_eq!(state.active_tasks().unwrap().completed_count(), 0);
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let state = generated(SessionState::new(), "Python", &["a"]);
        let before = state.clone();
        assert_eq!(state.apply(Event::TaskToggled(5)), before);

        let empty = SessionState::new();
        assert_eq!(empty.clone().apply(Event::TaskToggled(0)), empty);
    }

    #[test]
    fn test_generate_replaces_set_and_clears_checks_but_keeps_history() {
        let state = generated(SessionState::new(), "Python", &["a", "b"])
            .apply(Event::TaskToggled(0))
            .apply(Event::AnalysisCompleted(entry(50, "next")));
        let recorded = state.history[0].clone();

        let state = generated(state, "Rust", &["x", "y", "z"]);
        let set = state.active_tasks().unwrap();
        assert_eq!(set.topic, "Rust");
        assert_eq!(set.descriptions(), vec!["x", "y", "z"]);
        assert_eq!(set.completed_count(), 0);

        // Recorded against two tasks; three tasks now must not change it
        assert_eq!(state.history, vec![recorded]);
        assert_eq!(state.history[0].percent, 50);
        assert_eq!(state.history[0].done, vec!["a"]);
    }

    #[test]
    fn test_failures_preserve_state() {
        let state = generated(SessionState::new(), "Python", &["a", "b"])
            .apply(Event::TaskToggled(1))
            .apply(Event::AnalysisCompleted(entry(50, "next")));
        let tasks_before = state.task_set.clone();

        let state = state
            .apply(Event::GenerationFailed("boom".to_string()))
            .apply(Event::AnalysisFailed("bang".to_string()));

        assert_eq!(state.task_set, tasks_before);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.generation_error.as_deref(), Some("boom"));
        assert_eq!(state.analysis_error.as_deref(), Some("bang"));

        let state = generated(state, "Go", &["g"]);
        assert!(state.generation_error.is_none());
    }

    #[test]
    fn test_history_is_append_only() {
        let first = entry(25, "first");
        let state = SessionState::new().apply(Event::AnalysisCompleted(first.clone()));
        let state = state.apply(Event::AnalysisCompleted(entry(75, "second")));

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0], first);
        assert_eq!(state.latest_analysis().unwrap().percent, 75);
    }

    #[test]
    fn test_pending_topic() {
        let state = SessionState::new().apply(Event::TopicChanged("   ".to_string()));
        assert_eq!(state.pending_topic(), None);

        let state = state.apply(Event::TopicChanged("  Python ".to_string()));
        assert_eq!(state.pending_topic(), Some("Python"));
    }

    #[test]
    fn test_empty_generation_is_not_active() {
        let state = generated(SessionState::new(), "Python", &[]);
        assert!(state.task_set.is_some());
        assert!(state.active_tasks().is_none());
    }
}
