//! taskgen - AI practice-task generator for your terminal.
//!
//! Generates practice tasks for a topic, tracks which ones are done, and
//! asks the model what to study next.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use taskgen::ai::{OpenAIProvider, ProgressAnalyzer, TaskGenerator};
use taskgen::core::{
    export_tasks_to_json, export_tasks_to_txt, load_env_files, render_json, Config, ExportFormat,
};
use taskgen::{tui, App};

/// AI practice-task generator for your terminal
#[derive(Parser)]
#[command(name = "taskgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Extra env file to load before config.env / .env
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive task board (default)
    Run,

    /// Generate practice tasks for a topic and print them
    Generate {
        /// Topic to generate tasks for
        topic: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = parse_print_format)]
        format: PrintFormat,
    },

    /// Recommend next steps for completed tasks
    Analyze {
        /// Completed tasks
        completed: Vec<String>,
    },

    /// Generate tasks for a topic and write them to a file
    Export {
        /// Topic to generate tasks for
        topic: String,

        /// File format (txt, json)
        #[arg(short, long, default_value = "txt", value_parser = parse_export_format)]
        format: ExportFormat,

        /// Output path (defaults to <topic>_tasks.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn parse_export_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(value).ok_or_else(|| format!("unknown format '{value}' (use txt or json)"))
}

/// How `generate` prints its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrintFormat {
    /// Numbered lines
    Text,
    /// The same document `export --format json` writes
    Json,
}

fn parse_print_format(value: &str) -> Result<PrintFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "text" => Ok(PrintFormat::Text),
        "json" => Ok(PrintFormat::Json),
        _ => Err(format!("unknown format '{value}' (use text or json)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Run));
    init_logging(cli.verbose, interactive);

    load_env_files(cli.env_file.as_deref())?;

    match cli.command {
        None | Some(Commands::Run) => cmd_run(),
        Some(Commands::Generate { topic, format }) => cmd_generate(&topic, format),
        Some(Commands::Analyze { completed }) => cmd_analyze(&completed),
        Some(Commands::Export { topic, format, output }) => cmd_export(&topic, format, output),
        Some(Commands::Config { path }) => cmd_config(path),
        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "taskgen", &mut io::stdout());
            Ok(())
        }
    }
}

/// Setup logging.
///
/// The interactive UI owns the terminal, so its logs go to a file in the
/// data directory.
fn init_logging(verbose: bool, interactive: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    if !interactive {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .with(filter)
            .init();
        return;
    }

    let Some(dir) = Config::data_dir() else {
        return;
    };
    let file = std::fs::create_dir_all(&dir)
        .and_then(|()| OpenOptions::new().create(true).append(true).open(dir.join("taskgen.log")));

    if let Ok(file) = file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();
    }
}

/// Build the API client. A missing key stops the program here.
fn provider(config: &Config) -> Result<Arc<OpenAIProvider>> {
    let provider = OpenAIProvider::from_env(&config.ai)?;
    tracing::debug!(model = provider.model(), "Using OpenAI provider");
    Ok(Arc::new(provider))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to create async runtime")
}

/// Open the interactive task board.
fn cmd_run() -> Result<()> {
    let config = Config::load()?;
    let provider = provider(&config)?;
    let runtime = runtime()?;

    let app = App::new(provider, config);
    tui::run_tui(app, &runtime)
}

/// Print generated tasks.
fn cmd_generate(topic: &str, format: PrintFormat) -> Result<()> {
    let config = Config::load()?;
    let generator = TaskGenerator::new(provider(&config)?);

    let tasks = runtime()?.block_on(generator.generate(topic))?;

    match format {
        PrintFormat::Json => println!("{}", render_json(&tasks, topic)?),
        PrintFormat::Text => {
            for (i, task) in tasks.iter().enumerate() {
                println!("{}. {}", i + 1, task);
            }
        }
    }

    Ok(())
}

/// Print recommendations for completed tasks.
fn cmd_analyze(completed: &[String]) -> Result<()> {
    let config = Config::load()?;
    let analyzer = ProgressAnalyzer::new(provider(&config)?);

    let recommendations = runtime()?.block_on(analyzer.analyze(completed))?;
    for recommendation in &recommendations {
        println!("- {recommendation}");
    }

    Ok(())
}

/// Generate tasks and write them to a file.
fn cmd_export(topic: &str, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let generator = TaskGenerator::new(provider(&config)?);

    let tasks = runtime()?.block_on(generator.generate(topic))?;
    if tasks.is_empty() {
        anyhow::bail!("The model returned no tasks for '{topic}'");
    }

    let path = match format {
        ExportFormat::Txt => export_tasks_to_txt(&tasks, topic, output.as_deref())?,
        ExportFormat::Json => export_tasks_to_json(&tasks, topic, output.as_deref())?,
    };

    println!("Exported {} tasks to {}", tasks.len(), path.display());
    Ok(())
}

/// Show configuration.
fn cmd_config(show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_file() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}
