//! Shared types for salvage
//!
//! This crate provides:
//! - Resource identifiers for tracked documents
//! - Collaborator traits (working copies, document registries, backup store)
//! - Event emitters with RAII subscriptions
//! - Auto-save configuration
//! - Content hashing for backup snapshots

pub mod config;
pub mod event;
pub mod hash;
pub mod model;
pub mod resource;

// Re-exports
pub use config::{AutoSaveConfiguration, AUTO_SAVE_SUPPRESS_THRESHOLD};
pub use event::{Emitter, Subscription, Subscriptions};
pub use hash::{hash_content, ContentHash};
pub use model::{
    BackupFileService, BackupModel, ConfigurationService, TextFileService, UntitledService,
    WorkingCopy, WorkingCopyCapabilities, WorkingCopyService,
};
pub use resource::{Resource, ResourceError, UNTITLED_SCHEME};
