//! Application state and action dispatch.
//!
//! The `App` struct owns the session state, the generator and analyzer, and
//! the UI-only state (focus, selection, status line). User input is mapped
//! to an [`Action`] and handed to [`App::dispatch`].

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;

use crate::ai::{CompletionProvider, ProgressAnalyzer, TaskGenerator};
use crate::core::{
    prepare_download, AnalysisEntry, Config, Download, Event, ExportFormat, SessionState,
};
use crate::tui::{history_lines, Theme};

/// Main application state.
pub struct App {
    /// Session data (topic, tasks, history)
    pub session: SessionState,

    /// Cursor position in the topic input (in chars)
    pub cursor_position: usize,

    /// Currently highlighted task
    pub selected: usize,

    /// First history line shown in the history panel
    pub history_scroll: usize,

    /// Current mode of the application
    pub mode: AppMode,

    /// Status message to display (if any)
    pub status_message: Option<String>,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Application configuration
    pub config: Config,

    /// Current UI theme
    pub theme: Theme,

    generator: TaskGenerator,
    analyzer: ProgressAnalyzer,
}

/// Application modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Navigating the task list
    #[default]
    Normal,

    /// Typing into the topic input
    EditingTopic,

    /// Showing help screen with keyboard shortcuts
    Help,
}

/// Everything the user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Generate tasks for the current topic
    Generate,
    /// Toggle the task at this position
    Toggle(usize),
    /// Toggle the highlighted task
    ToggleSelected,
    /// Export the task list
    Export(ExportFormat),
    /// Analyze progress and append to history
    Analyze,
}

/// What a dispatched action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened (invalid input)
    Ignored,
    /// State changed
    Updated,
    /// A file payload is ready to save
    Download(Download),
    /// The external call failed; the error is in the session state
    Failed,
}

impl App {
    /// Create an app around an explicit provider.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: Config) -> Self {
        let (theme, status_message) = match Theme::by_name(&config.ui.theme) {
            Some(theme) => (theme, None),
            None => {
                let available = Theme::available_themes().join(", ");
                tracing::warn!(theme = %config.ui.theme, %available, "Unknown theme, using default");
                let message =
                    format!("Unknown theme '{}' (available: {available})", config.ui.theme);
                (Theme::default(), Some(message))
            }
        };

        Self {
            session: SessionState::new(),
            cursor_position: 0,
            selected: 0,
            history_scroll: 0,
            mode: AppMode::default(),
            status_message,
            should_quit: false,
            config,
            theme,
            generator: TaskGenerator::new(Arc::clone(&provider)),
            analyzer: ProgressAnalyzer::new(provider),
        }
    }

    /// Run one action to completion.
    ///
    /// Errors from the model are recorded in the session state and never
    /// returned; export I/O errors are.
    pub async fn dispatch(&mut self, action: Action) -> anyhow::Result<Outcome> {
        tracing::debug!(?action, "Dispatching action");

        match action {
            Action::Generate => Ok(self.generate().await),
            Action::Toggle(index) => Ok(self.toggle(index)),
            Action::ToggleSelected => Ok(self.toggle(self.selected)),
            Action::Export(format) => self.export(format),
            Action::Analyze => Ok(self.analyze().await),
        }
    }

    fn apply(&mut self, event: Event) {
        let session = std::mem::take(&mut self.session);
        self.session = session.apply(event);
    }

    async fn generate(&mut self) -> Outcome {
        let Some(topic) = self.session.pending_topic().map(str::to_string) else {
            return Outcome::Ignored;
        };

        self.set_status(format!("Generating tasks for '{topic}'..."));

        match self.generator.generate(&topic).await {
            Ok(tasks) => {
                let count = tasks.len();
                self.apply(Event::TasksGenerated { topic, tasks });
                self.selected = 0;
                self.set_status(format!("Generated {count} tasks"));
                Outcome::Updated
            }
            Err(e) => {
                tracing::warn!(error = %e, "Task generation failed");
                self.apply(Event::GenerationFailed(format!("Error: {e}")));
                self.clear_status();
                Outcome::Failed
            }
        }
    }

    fn toggle(&mut self, index: usize) -> Outcome {
        let in_range = self.session.active_tasks().is_some_and(|set| index < set.len());
        if !in_range {
            return Outcome::Ignored;
        }
        self.apply(Event::TaskToggled(index));
        Outcome::Updated
    }

    /// Build the export payload for the active task set.
    ///
    /// The file is named after the topic the tasks were generated for. Text
    /// typed into the topic input since then is ignored until the next
    /// generation.
    fn export(&mut self, format: ExportFormat) -> anyhow::Result<Outcome> {
        let Some(set) = self.session.active_tasks() else {
            return Ok(Outcome::Ignored);
        };
        if set.topic.trim().is_empty() {
            return Ok(Outcome::Ignored);
        }

        let download = prepare_download(format, &set.descriptions(), &set.topic)?;
        tracing::info!(filename = %download.filename, "Prepared export");
        Ok(Outcome::Download(download))
    }

    async fn analyze(&mut self) -> Outcome {
        let Some(set) = self.session.active_tasks() else {
            return Outcome::Ignored;
        };

        let done = set.completed();
        let percent = set.completion_percent();

        match self.analyzer.analyze(&done).await {
            Ok(recommendations) => {
                self.apply(Event::AnalysisCompleted(AnalysisEntry {
                    done,
                    percent,
                    recommendations,
                    taken_at: Local::now(),
                }));
                self.set_status(format!("Analysis #{} saved", self.session.history.len()));
                Outcome::Updated
            }
            Err(e) => {
                tracing::warn!(error = %e, "Progress analysis failed");
                self.apply(Event::AnalysisFailed(format!("Analysis error: {e}")));
                self.clear_status();
                Outcome::Failed
            }
        }
    }

    /// Save a download into the configured export directory.
    pub fn save_download(&mut self, download: &Download) -> anyhow::Result<PathBuf> {
        let path = download.save_to(&self.config.export.directory)?;

        let exported_topic = self
            .session
            .active_tasks()
            .map(|set| set.topic.clone())
            .filter(|topic| topic.as_str() != self.session.topic.trim());
        match exported_topic {
            Some(topic) => self.set_status(format!(
                "Saved {} (tasks for '{topic}', not the edited topic)",
                path.display()
            )),
            None => self.set_status(format!("Saved {}", path.display())),
        }
        Ok(path)
    }

    // ------------------------------------------------------------------
    // Topic input editing
    // ------------------------------------------------------------------

    fn set_topic(&mut self, topic: String) {
        self.apply(Event::TopicChanged(topic));
    }

    fn byte_index(&self) -> usize {
        self.session
            .topic
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.session.topic.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor.
    pub fn enter_char(&mut self, c: char) {
        let mut topic = self.session.topic.clone();
        topic.insert(self.byte_index(), c);
        self.set_topic(topic);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let mut topic = self.session.topic.clone();
        topic.remove(self.byte_index());
        self.set_topic(topic);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.session.topic.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(len);
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.session.topic.chars().count();
    }

    /// Clear the topic input.
    pub fn clear_input(&mut self) {
        self.set_topic(String::new());
        self.cursor_position = 0;
    }

    // ------------------------------------------------------------------
    // Navigation and modes
    // ------------------------------------------------------------------

    fn task_count(&self) -> usize {
        self.session.active_tasks().map_or(0, |set| set.len())
    }

    pub fn select_next(&mut self) {
        let count = self.task_count();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.task_count();
        if count > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
        }
    }

    pub fn scroll_history_up(&mut self, lines: usize) {
        self.history_scroll = self.history_scroll.saturating_sub(lines);
    }

    /// Scroll the history down, stopping at its last line.
    pub fn scroll_history_down(&mut self, lines: usize) {
        let last_line = history_lines(&self.session.history).len().saturating_sub(1);
        self.history_scroll = self.history_scroll.saturating_add(lines).min(last_line);
    }

    pub fn start_editing(&mut self) {
        self.mode = AppMode::EditingTopic;
        self.move_cursor_end();
    }

    pub fn stop_editing(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
