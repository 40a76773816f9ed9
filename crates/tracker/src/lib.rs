//! Working-copy backup scheduling for salvage
//!
//! This crate provides:
//! - Per-resource debounce timers with explicit cancellation handles
//! - The [`BackupTracker`], which reacts to document lifecycle events by
//!   scheduling backups of dirty documents and discarding stale ones

mod debounce;
pub mod error;
pub mod tracker;

// Re-exports
pub use error::{Result, TrackerError};
pub use tracker::{BackupTracker, TrackerOptions, TrackerServices, BACKUP_DEBOUNCE_DELAY};
