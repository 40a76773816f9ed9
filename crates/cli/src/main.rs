//! Salvage CLI - salvage command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod script;
mod system_config;

/// Salvage - crash-safe backups of unsaved editor state
#[derive(Parser)]
#[command(name = "salvage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/salvage/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted editor session and report backup activity
    Replay {
        /// TOML script of editor actions
        script: PathBuf,
        /// Wait for pending backups instead of cancelling them at the end
        #[arg(long)]
        drain: bool,
    },
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an example configuration
    Example,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = system_config::load(cli.config.as_deref())?;

    // Initialize tracing
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        config.level()?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay { script, drain } => cmd::replay::run(&config, &script, drain).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cmd::config::run_show(&config, cli.config.as_deref()),
            ConfigCommands::Path { create } => cmd::config::run_path(cli.config.as_deref(), create),
            ConfigCommands::Example => cmd::config::run_example(),
        },
    }
}
