//! Task list export to text and JSON files.
//!
//! Two plain writers ([`export_tasks_to_txt`], [`export_tasks_to_json`]) plus
//! [`prepare_download`], which runs a writer against a scratch directory and
//! hands back the file contents as an in-memory payload.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One `- task` line per task
    Txt,
    /// `{"topic": ..., "tasks": [...]}`
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Json => "json",
        }
    }

    /// Default file name for a topic, e.g. `Python_tasks.txt`.
    pub fn default_filename(self, topic: &str) -> String {
        format!("{}_tasks.{}", sanitize_topic(topic), self.extension())
    }

    /// Parse a format name (`txt`, `text`, `json`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(Self::Txt),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn write(self, tasks: &[String], topic: &str, path: &Path) -> anyhow::Result<PathBuf> {
        match self {
            Self::Txt => export_tasks_to_txt(tasks, topic, Some(path)),
            Self::Json => export_tasks_to_json(tasks, topic, Some(path)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// JSON document layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub topic: String,
    pub tasks: Vec<String>,
}

/// A file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name
    pub filename: String,
    /// File contents
    pub content: String,
}

impl Download {
    /// Write the payload into `dir`, overwriting any file with the same name.
    pub fn save_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Path separators would turn the topic into a directory walk.
fn sanitize_topic(topic: &str) -> String {
    topic.chars().map(|c| if matches!(c, '/' | '\\') { '_' } else { c }).collect()
}

fn resolve_path(path: Option<&Path>, topic: &str, format: ExportFormat) -> PathBuf {
    path.map_or_else(|| PathBuf::from(format.default_filename(topic)), Path::to_path_buf)
}

/// Render tasks in the text format.
pub fn render_txt(tasks: &[String]) -> String {
    tasks.iter().map(|task| format!("- {task}\n")).collect()
}

/// Render tasks in the JSON format (4-space indent, non-ASCII kept literal).
pub fn render_json(tasks: &[String], topic: &str) -> anyhow::Result<String> {
    let document = TaskDocument { topic: topic.to_string(), tasks: tasks.to_vec() };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;

    Ok(String::from_utf8(buf)?)
}

/// Write tasks as a text file, one `- task` line each.
///
/// Defaults to `<topic>_tasks.txt` in the current directory. Returns the
/// path written.
pub fn export_tasks_to_txt(
    tasks: &[String],
    topic: &str,
    path: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let path = resolve_path(path, topic, ExportFormat::Txt);
    fs::write(&path, render_txt(tasks))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "Exported tasks as text");
    Ok(path)
}

/// Write tasks as a JSON document.
///
/// Defaults to `<topic>_tasks.json` in the current directory. Returns the
/// path written.
pub fn export_tasks_to_json(
    tasks: &[String],
    topic: &str,
    path: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let path = resolve_path(path, topic, ExportFormat::Json);
    let content = render_json(tasks, topic)?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "Exported tasks as JSON");
    Ok(path)
}

/// Export into a scratch directory, read the file back and delete it.
///
/// The returned payload does not reference any file on disk.
pub fn prepare_download(
    format: ExportFormat,
    tasks: &[String],
    topic: &str,
) -> anyhow::Result<Download> {
    let scratch = tempfile::Builder::new()
        .prefix("taskgen-export-")
        .tempdir()
        .context("Failed to create temporary export directory")?;

    let filename = format.default_filename(topic);
    let path = format.write(tasks, topic, &scratch.path().join(&filename))?;

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;

    Ok(Download { filename, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tasks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_txt_lines_match_tasks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let list = tasks(&["Learn loops", "Learn functions", "Write a CLI"]);

        let written = export_tasks_to_txt(&list, "Python", Some(&path)).unwrap();
        assert_eq!(written, path);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), list.len());
        assert!(lines.iter().all(|line| line.starts_with("- ")));
        assert_eq!(content, "- Learn loops\n- Learn functions\n- Write a CLI\n");
    }

    #[test]
    fn test_txt_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale content that is longer than the new one\n").unwrap();

        export_tasks_to_txt(&tasks(&["One"]), "Topic", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- One\n");
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let list = tasks(&["B first", "A second", "C third"]);

        export_tasks_to_json(&list, "Rust", Some(&path)).unwrap();

        let doc: TaskDocument = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc.topic, "Rust");
        assert_eq!(doc.tasks, list);
    }

    #[test]
    fn test_json_layout() {
        let json = render_json(&tasks(&["Циклы"]), "Питон").unwrap();
        assert_eq!(json, "{\n    \"topic\": \"Питон\",\n    \"tasks\": [\n        \"Циклы\"\n    ]\n}");
    }

    #[test]
    fn test_default_filenames() {
        assert_eq!(ExportFormat::Txt.default_filename("Python"), "Python_tasks.txt");
        assert_eq!(ExportFormat::Json.default_filename("Python"), "Python_tasks.json");
        assert_eq!(ExportFormat::Txt.default_filename("C/C++"), "C_C++_tasks.txt");
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(ExportFormat::from_name("TXT"), Some(ExportFormat::Txt));
        assert_eq!(ExportFormat::from_name("text"), Some(ExportFormat::Txt));
        assert_eq!(ExportFormat::from_name("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_name("yaml"), None);
    }

    #[test]
    fn test_prepare_download_returns_content() {
        let list = tasks(&["Learn loops", "Learn functions"]);

        let download = prepare_download(ExportFormat::Txt, &list, "Python").unwrap();
        assert_eq!(download.filename, "Python_tasks.txt");
        assert_eq!(download.content, "- Learn loops\n- Learn functions\n");

        let download = prepare_download(ExportFormat::Json, &list, "Python").unwrap();
        assert_eq!(download.filename, "Python_tasks.json");
        let doc: TaskDocument = serde_json::from_str(&download.content).unwrap();
        assert_eq!(doc.tasks, list);
    }

    #[test]
    fn test_download_save_to() {
        let dir = tempdir().unwrap();
        let download = Download { filename: "x_tasks.txt".to_string(), content: "- a\n".to_string() };

        let path = download.save_to(&dir.path().join("nested")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "- a\n");
    }
}
