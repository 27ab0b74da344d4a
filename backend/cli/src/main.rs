mod config_cmd;
mod doctor_cmd;
mod extract_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use uuid::Uuid;

use textlift_clipboard::system_or_memory;
use textlift_config::{config_dir, config_file_path, load_and_prepare, validate, TextliftConfig};
use textlift_core::{ClipboardSink, Workbench};
use textlift_logging::{init_logger, spawn_session_logger, LogOutput};
use textlift_media::AcceptFilter;
use textlift_ocr::HttpOcrBackend;

use extract_cmd::ExtractOptions;

#[derive(Parser)]
#[command(name = "textlift")]
#[command(about = "textlift: extract text from images and PDFs with an OCR service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal UI (default)
    Ui {
        /// OCR endpoint, overriding the config file
        #[arg(long)]
        endpoint: Option<String>,
        /// Picker filter such as "image/*, .pdf", overriding the config file
        #[arg(long)]
        accept: Option<String>,
    },
    /// Extract text from a single file and print it
    Extract {
        file: PathBuf,
        /// Also copy the text to the clipboard
        #[arg(long)]
        copy: bool,
        /// Print the service's JSON shape instead of plain text
        #[arg(long)]
        json: bool,
        #[arg(long)]
        endpoint: Option<String>,
        /// Formats that pass without a warning, e.g. "image/*, .pdf"
        #[arg(long)]
        accept: Option<String>,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Check the config, the OCR endpoint and the clipboard
    Doctor {
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config as YAML
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with every default filled in
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = config_dir();
    let config_path = config_file_path(&config_dir);

    let default_command = Commands::Ui {
        endpoint: None,
        accept: None,
    };
    match cli.command.unwrap_or(default_command) {
        Commands::Ui { endpoint, accept } => {
            let config = load(&config_path, endpoint).await?;
            init_logging(&config, &config_dir, LogOutput::FileOnly)?;
            let workbench = build_workbench(&config, system_or_memory());
            spawn_session_logger(workbench.subscribe(), Uuid::new_v4().to_string());

            let start_dir = std::env::current_dir()
                .ok()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            textlift_tui::run(workbench, accept_filter(&config, accept.as_deref()), start_dir).await?;
        }
        Commands::Extract {
            file,
            copy,
            json,
            endpoint,
            accept,
        } => {
            let config = load(&config_path, endpoint).await?;
            init_logging(&config, &config_dir, LogOutput::ConsoleAndFile)?;
            let clipboard = system_or_memory();
            let workbench = build_workbench(&config, clipboard.clone());
            spawn_session_logger(workbench.subscribe(), Uuid::new_v4().to_string());

            let filter = accept_filter(&config, accept.as_deref());
            extract_cmd::run(&workbench, clipboard, &filter, &file, ExtractOptions { copy, json }).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => println!("{}", config_path.display()),
            ConfigAction::Show => {
                let config = load(&config_path, None).await?;
                print!("{}", config_cmd::show(&config)?);
            }
            ConfigAction::Init { force } => config_cmd::init(&config_path, force).await?,
        },
        Commands::Doctor { endpoint } => {
            doctor_cmd::run(&config_path, endpoint.as_deref()).await?;
        }
    }

    Ok(())
}

/// Load the prepared config and apply `--endpoint`, which is validated like
/// the file value.
async fn load(path: &Path, endpoint: Option<String>) -> Result<TextliftConfig> {
    let mut config = load_and_prepare(path).await?;
    if let Some(endpoint) = endpoint {
        config.set_endpoint(endpoint);
        if let Some(err) = validate(&config).errors.into_iter().next() {
            return Err(err.into());
        }
    }
    Ok(config)
}

fn init_logging(config: &TextliftConfig, config_dir: &Path, output: LogOutput) -> Result<()> {
    let log_dir = config.log_dir(config_dir);
    init_logger(&log_dir, config.log_level(), output)
        .with_context(|| format!("Failed to open log directory {}", log_dir.display()))?;

    // Config warnings were raised before the subscriber existed
    for warning in validate(config).warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    info!(endpoint = %config.endpoint(), log_dir = %log_dir.display(), "textlift starting");
    Ok(())
}

fn build_workbench(config: &TextliftConfig, clipboard: Arc<dyn ClipboardSink>) -> Workbench {
    let backend = HttpOcrBackend::new(config.endpoint()).with_field_name(config.field_name());
    Workbench::new(Arc::new(backend), clipboard).with_copy_ack(config.copy_ack())
}

/// `--accept` replaces the configured list when given.
fn accept_filter(config: &TextliftConfig, flag: Option<&str>) -> AcceptFilter {
    match flag {
        Some(accept) => AcceptFilter::parse(accept),
        None => AcceptFilter::new(config.accept().as_slice()),
    }
}
