//! Configuration management command
//!
//! Provides CLI interface to view the salvage configuration.

use crate::system_config::{self, SalvageConfig};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Print the effective configuration
pub fn run_show(config: &SalvageConfig, source: Option<&Path>) -> Result<()> {
    println!("{}", "Salvage Configuration".bold());
    match resolve_path(source) {
        Ok(path) if path.exists() => {
            println!("{}: {}\n", "Location".dimmed(), path.display().dimmed())
        }
        _ => println!("{}\n", "(defaults, no config file)".dimmed()),
    }

    println!("{} = {}", "log_level".cyan(), config.log_level);

    println!("\n{}", "[backup]".yellow());
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.backup.debounce_ms,
        format!("({:?})", config.debounce_delay()).dimmed()
    );

    println!("\n{}", "[files]".yellow());
    match config.files.auto_save_delay_ms {
        Some(delay) => println!(
            "  {} = {} {}",
            "auto_save_delay_ms".cyan(),
            delay,
            if config.auto_save().suppresses_backups() {
                "(file backups suppressed)".dimmed().to_string()
            } else {
                "(file backups active)".dimmed().to_string()
            }
        ),
        None => println!("  {} {}", "auto_save_delay_ms".cyan(), "(unset)".dimmed()),
    }

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce_ms: 1-60,000");
    println!("  log_level: trace | debug | info | warn | error");

    Ok(())
}

/// Show the config file path and optionally create it
pub fn run_path(source: Option<&Path>, create: bool) -> Result<()> {
    let config_path = resolve_path(source)?;

    if create && !config_path.exists() {
        system_config::init_if_missing(&config_path)?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else {
        println!("{}", config_path.display());
        if !config_path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".yellow());
        }
    }

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    println!("{}", system_config::example_config());
    Ok(())
}

fn resolve_path(source: Option<&Path>) -> Result<PathBuf> {
    match source {
        Some(path) => Ok(path.to_path_buf()),
        None => system_config::config_file_path().context("Could not determine config file path"),
    }
}
