//! Shared harness for tracker integration tests
//!
//! Tests run on a paused tokio clock (`start_paused = true`), so sleeping
//! advances virtual time instantly and timers fire deterministically.

#![allow(dead_code)]

use salvage_core::{AutoSaveConfiguration, Resource};
use salvage_tracker::{BackupTracker, TrackerOptions, TrackerServices};
use salvage_workspace::Workspace;
use std::time::Duration;

/// Workspace with a tracker subscribed to it
pub struct Harness {
    pub ws: Workspace,
    pub tracker: BackupTracker,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AutoSaveConfiguration::default())
    }

    pub fn with_config(config: AutoSaveConfiguration) -> Self {
        let ws = Workspace::new(config);
        let tracker = BackupTracker::new(services(&ws), TrackerOptions::default())
            .expect("tracker needs a runtime");
        Self { ws, tracker }
    }

    /// Open a clean file document
    pub fn open(&self, path: &str, content: &str) -> Resource {
        let resource = file(path);
        self.ws.open(&resource, content);
        resource
    }

    pub fn backups(&self, resource: &Resource) -> usize {
        self.ws.backups.backup_count(resource)
    }

    pub fn discards(&self, resource: &Resource) -> usize {
        self.ws.backups.discard_count(resource)
    }
}

pub fn services(ws: &Workspace) -> TrackerServices {
    TrackerServices {
        working_copies: ws.working_copies.clone(),
        text_files: ws.text_files.clone(),
        untitled: ws.untitled.clone(),
        configuration: ws.configuration.clone(),
        backup_files: ws.backups.clone(),
    }
}

pub fn file(path: &str) -> Resource {
    Resource::parse(&format!("file://{path}")).unwrap()
}

pub fn untitled(name: &str) -> Resource {
    Resource::untitled(name).unwrap()
}

/// Let spawned tasks that are already runnable finish
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Advance virtual time by `ms`, running every timer that comes due
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    settle().await;
}
