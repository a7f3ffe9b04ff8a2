//! # taskgen
//!
//! AI practice-task generator for your terminal.
//!
//! Enter a topic, get a list of practice tasks from a language model, check
//! off what you have done, and ask for follow-up recommendations. Every
//! analysis is kept in a session history, and the task list can be exported
//! as text or JSON.
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! taskgen                      # interactive
//! taskgen generate "Python"    # print tasks and exit
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::future_not_send)]

pub mod ai;
pub mod app;
pub mod core;
pub mod tui;

pub use ai::{CompletionProvider, OpenAIProvider, ProgressAnalyzer, TaskGenerator};
pub use app::{Action, App, AppMode, Outcome};
pub use self::core::{Config, ExportFormat, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "taskgen";
