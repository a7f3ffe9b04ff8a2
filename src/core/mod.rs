//! Core types and functionality for taskgen.
//!
//! This module contains everything that does not talk to the network or the
//! terminal: configuration, reply parsing, session state and export.

mod config;
mod export;
mod extract;
mod session;

pub use config::{
    api_key_from_env, load_env_files, AiConfig, Config, ConfigError, ExportConfig, UiConfig,
    API_KEY_VAR, ENV_FILES,
};
pub use export::{
    export_tasks_to_json, export_tasks_to_txt, prepare_download, render_json, render_txt,
    Download, ExportFormat, TaskDocument,
};
pub use extract::{clean_line, extract_items};
pub use session::{
    completion_percent, AnalysisEntry, Event, SessionState, Task, TaskSet,
};
