//! Replay an editor session against the backup tracker

use crate::script::{Script, Step};
use crate::system_config::SalvageConfig;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use salvage_core::AutoSaveConfiguration;
use salvage_tracker::{BackupTracker, TrackerOptions, TrackerServices};
use salvage_workspace::{StoreEvent, Workspace};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a replay
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub events: Vec<StoreEvent>,
    /// Resources that would be restored after a crash
    pub surviving: Vec<String>,
    /// Backups still waiting for their delay when the session ended
    pub pending_at_end: usize,
}

pub async fn run(config: &SalvageConfig, script_path: &Path, drain: bool) -> Result<()> {
    let script = Script::load(script_path)?;
    info!(steps = script.steps.len(), script = %script_path.display(), "Replaying session");

    let report = replay(config, &script, drain).await?;
    print_report(&report);
    Ok(())
}

/// Drive `script` through a fresh workspace and tracker
pub async fn replay(config: &SalvageConfig, script: &Script, drain: bool) -> Result<ReplayReport> {
    let ws = Workspace::new(config.auto_save());
    let services = TrackerServices {
        working_copies: ws.working_copies.clone(),
        text_files: ws.text_files.clone(),
        untitled: ws.untitled.clone(),
        configuration: ws.configuration.clone(),
        backup_files: ws.backups.clone(),
    };
    let options = TrackerOptions {
        debounce_delay: config.debounce_delay(),
        ..TrackerOptions::default()
    };
    let tracker = BackupTracker::new(services, options).context("Failed to start backup tracker")?;

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index = index + 1, ?step, "Applying step");
        apply(&ws, step)
            .await
            .with_context(|| format!("Step {} failed", index + 1))?;
        settle().await;
    }

    if drain && tracker.pending_count() > 0 {
        debug!(pending = tracker.pending_count(), "Waiting for pending backups");
        tokio::time::sleep(config.debounce_delay() + Duration::from_millis(50)).await;
        settle().await;
    }

    let pending_at_end = tracker.pending_count();
    tracker.dispose();

    Ok(ReplayReport {
        events: ws.backups.events(),
        surviving: ws
            .backups
            .resources()
            .into_iter()
            .map(|r| r.to_string())
            .collect(),
        pending_at_end,
    })
}

async fn apply(ws: &Workspace, step: &Step) -> Result<()> {
    match step {
        Step::Open { resource, content } => {
            ws.open(resource, content);
        }
        Step::NewUntitled { resource, content } => {
            ws.new_untitled(resource, content)?;
        }
        Step::Edit { resource, content } => ws.edit(resource, content)?,
        Step::Save { resource } => ws.save(resource)?,
        Step::Revert { resource } => ws.revert(resource)?,
        Step::Close { resource } => ws.close(resource)?,
        Step::SetAutoSaveDelay { ms } => ws.set_auto_save(AutoSaveConfiguration {
            auto_save_delay_ms: *ms,
        }),
        Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
    }
    Ok(())
}

/// Give spawned tracker tasks a chance to run on the current-thread runtime
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn print_report(report: &ReplayReport) {
    println!("{}", "Store activity".bold());
    if report.events.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for event in &report.events {
        match event {
            StoreEvent::Backup {
                resource,
                content_hash,
                version,
            } => println!(
                "  {} {} {} {}",
                "backup ".green(),
                resource.to_string().cyan(),
                format!("v{}", version).yellow(),
                content_hash.short().dimmed()
            ),
            StoreEvent::Discard { resource, existed } => println!(
                "  {} {} {}",
                "discard".red(),
                resource.to_string().cyan(),
                (if *existed { "" } else { "(nothing stored)" }).dimmed()
            ),
        }
    }

    println!("\n{}", "Recoverable after crash".bold());
    if report.surviving.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for resource in &report.surviving {
        println!("  {}", resource.cyan());
    }

    if report.pending_at_end > 0 {
        println!(
            "\n{} {} backup(s) were still pending and got cancelled",
            "Note:".yellow(),
            report.pending_at_end
        );
    }
}
