use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A scroll-animated portfolio page in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the page in the terminal
    Run {
        /// Page description (TOML); the built-in page when omitted
        #[arg(short, long)]
        page: Option<PathBuf>,
    },
    /// List the sections of a page
    Sections {
        #[arg(short, long)]
        page: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Install the global subscriber. While the terminal UI owns the screen,
/// logs go to `<data_dir>/folio.log` instead of stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; a broken file falls back to defaults
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let interactive = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, interactive)?;
    if let Some(e) = config_error {
        warn!("Ignoring invalid config {}: {}", AppConfig::config_path().display(), e);
    }

    match cli.command {
        None => commands::run::run(config, None).await,
        Some(Commands::Run { page }) => commands::run::run(config, page.as_deref()).await,
        Some(Commands::Sections { page, json }) => commands::sections::run(page.as_deref(), json),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}
