//! Configuration management for taskgen.
//!
//! Settings come from a TOML file; the API key comes from the environment
//! (optionally seeded from `config.env` / `.env` files).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Env files loaded at startup, in order. Variables already set win.
pub const ENV_FILES: &[&str] = &["config.env", "../config.env", ".env"];

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found. Set it in the environment or in config.env")]
    MissingApiKey,

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to load env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language-model settings
    pub ai: AiConfig,

    /// UI/TUI settings
    pub ui: UiConfig,

    /// Export settings
    pub export: ExportConfig,
}

/// Language-model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Chat model identifier
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f64,
}

/// UI/TUI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme name (default, dracula, nord)
    pub theme: String,
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory where exported files are saved
    pub directory: PathBuf,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.7,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { theme: "default".to_string() }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from(".") }
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Checks `.taskgen.toml` in the current directory, then the global
    /// config file. Falls back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let local_config = PathBuf::from(".taskgen.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(path) = Self::config_file() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Get the global config directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("taskgen"))
    }

    /// Get the global config file path.
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Get the data directory path (logs).
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("taskgen"))
    }
}

/// Load env files into the process environment.
///
/// Missing default files are skipped. An explicit `env_file` must exist.
pub fn load_env_files(env_file: Option<&Path>) -> Result<(), ConfigError> {
    if let Some(path) = env_file {
        dotenvy::from_path(path)
            .map_err(|source| ConfigError::EnvFile { path: path.to_path_buf(), source })?;
    }

    for name in ENV_FILES {
        match dotenvy::from_filename(name) {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded env file"),
            Err(e) if e.not_found() => {}
            Err(source) => {
                return Err(ConfigError::EnvFile { path: PathBuf::from(name), source });
            }
        }
    }

    Ok(())
}

/// Read the API key from the environment.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    std::env::var(API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)
}
