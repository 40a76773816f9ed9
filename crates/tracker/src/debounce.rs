//! Per-resource debounce timers
//!
//! At most one timer is pending per resource. Scheduling a new one cancels
//! the previous timer in the same critical section, so the newest request
//! always wins and no timer is ever left running without an entry.

use parking_lot::Mutex;
use salvage_core::Resource;
use std::collections::HashMap;
use tokio::task::AbortHandle;

/// Cancellation handle of one scheduled backup
#[derive(Debug)]
pub struct BackupTimer {
    /// Sequence number identifying this schedule
    seq: u64,
    handle: AbortHandle,
}

impl BackupTimer {
    pub fn new(seq: u64, handle: AbortHandle) -> Self {
        Self { seq, handle }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Stop the timer. Harmless if it already fired or was aborted.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

struct Entries {
    next_seq: u64,
    timers: HashMap<Resource, BackupTimer>,
}

/// Pending backups keyed by resource
pub struct PendingBackups {
    entries: Mutex<Entries>,
}

impl PendingBackups {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Entries {
                next_seq: 0,
                timers: HashMap::new(),
            }),
        }
    }

    /// Replace any pending timer for `resource` with a new one
    ///
    /// `spawn` receives the sequence number of the new schedule and returns
    /// the abort handle of the task it started. It runs under the map lock
    /// and must not call back into this map.
    pub fn schedule<F>(&self, resource: &Resource, spawn: F) -> u64
    where
        F: FnOnce(u64) -> AbortHandle,
    {
        let mut entries = self.entries.lock();

        if let Some(previous) = entries.timers.remove(resource) {
            previous.cancel();
        }

        let seq = entries.next_seq;
        entries.next_seq += 1;

        let handle = spawn(seq);
        entries.timers.insert(resource.clone(), BackupTimer::new(seq, handle));
        seq
    }

    /// Cancel and remove the pending timer for `resource`
    ///
    /// Returns true if a timer was pending.
    pub fn cancel(&self, resource: &Resource) -> bool {
        match self.entries.lock().timers.remove(resource) {
            Some(timer) => {
                timer.cancel();
                true
            }
            None => false,
        }
    }

    /// Called by a timer when it fires
    ///
    /// Removes the entry only if it still belongs to schedule `seq`. Returns
    /// false when that schedule was superseded or cancelled in the meantime.
    pub fn complete(&self, resource: &Resource, seq: u64) -> bool {
        let mut entries = self.entries.lock();
        match entries.timers.get(resource) {
            Some(timer) if timer.seq() == seq => {
                entries.timers.remove(resource);
                true
            }
            _ => false,
        }
    }

    /// Cancel every pending timer, returning how many there were
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<BackupTimer> = {
            let mut entries = self.entries.lock();
            entries.timers.drain().map(|(_, timer)| timer).collect()
        };

        let count = drained.len();
        for timer in drained {
            timer.cancel();
        }
        count
    }

    pub fn contains(&self, resource: &Resource) -> bool {
        self.entries.lock().timers.contains_key(resource)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().timers.len()
    }
}

impl Default for PendingBackups {
    fn default() -> Self {
        Self::new()
    }
}
