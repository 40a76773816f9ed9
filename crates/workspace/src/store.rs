//! In-memory backup store
//!
//! Keeps the latest snapshot per resource plus an append-only log of every
//! write and discard, so callers can assert exactly what was asked of it.

use async_trait::async_trait;
use parking_lot::RwLock;
use salvage_core::{hash_content, BackupFileService, ContentHash, Resource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};
use ulid::Ulid;

/// Recovery snapshot of one dirty document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSnapshot {
    /// Unique ID (ULID for timestamp + uniqueness)
    pub id: Ulid,
    pub resource: Resource,
    pub content: String,
    pub content_hash: ContentHash,
    /// Document version the content was taken from
    pub version: u64,
    /// Timestamp (Unix milliseconds)
    pub created_at_ms: u64,
}

/// Operation recorded by the store, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Backup {
        resource: Resource,
        content_hash: ContentHash,
        version: u64,
    },
    Discard {
        resource: Resource,
        /// A snapshot existed and was removed
        existed: bool,
    },
}

#[derive(Default)]
pub struct MemoryBackupStore {
    snapshots: RwLock<HashMap<Resource, BackupSnapshot>>,
    log: RwLock<Vec<StoreEvent>>,
    failing: AtomicBool,
}

impl MemoryBackupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail, to exercise error paths
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Persist `content` as the current backup of `resource`
    pub fn write(&self, resource: &Resource, content: &str, version: u64) -> anyhow::Result<ContentHash> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("backup store unavailable, cannot write {}", resource);
        }

        let snapshot = BackupSnapshot {
            id: Ulid::new(),
            resource: resource.clone(),
            content: content.to_string(),
            content_hash: hash_content(content.as_bytes()),
            version,
            created_at_ms: current_timestamp_ms(),
        };
        let content_hash = snapshot.content_hash;

        self.snapshots.write().insert(resource.clone(), snapshot);
        self.log.write().push(StoreEvent::Backup {
            resource: resource.clone(),
            content_hash,
            version,
        });

        debug!(resource = %resource, version, hash = %content_hash.short(), "Backup written");
        Ok(content_hash)
    }

    /// Latest snapshot for `resource`, if any
    pub fn get(&self, resource: &Resource) -> Option<BackupSnapshot> {
        self.snapshots.read().get(resource).cloned()
    }

    pub fn has_backup(&self, resource: &Resource) -> bool {
        self.snapshots.read().contains_key(resource)
    }

    /// Resources with a live snapshot, sorted
    pub fn resources(&self) -> Vec<Resource> {
        let mut resources: Vec<_> = self.snapshots.read().keys().cloned().collect();
        resources.sort();
        resources
    }

    /// Every write and discard so far
    pub fn events(&self) -> Vec<StoreEvent> {
        self.log.read().clone()
    }

    pub fn backup_count(&self, resource: &Resource) -> usize {
        self.log
            .read()
            .iter()
            .filter(|e| matches!(e, StoreEvent::Backup { resource: r, .. } if r == resource))
            .count()
    }

    pub fn discard_count(&self, resource: &Resource) -> usize {
        self.log
            .read()
            .iter()
            .filter(|e| matches!(e, StoreEvent::Discard { resource: r, .. } if r == resource))
            .count()
    }

    /// Number of live snapshots
    pub fn count(&self) -> usize {
        self.snapshots.read().len()
    }
}

#[async_trait]
impl BackupFileService for MemoryBackupStore {
    async fn discard_backup(&self, resource: &Resource) -> anyhow::Result<()> {
        let existed = self.snapshots.write().remove(resource).is_some();
        self.log.write().push(StoreEvent::Discard {
            resource: resource.clone(),
            existed,
        });
        trace!(resource = %resource, existed, "Backup discarded");
        Ok(())
    }
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
