//! In-memory editor collaborators for salvage
//!
//! This crate provides:
//! - Documents that act as working copies and backup models
//! - Registries for file-backed and untitled documents
//! - A runtime-changeable auto-save configuration
//! - A recording backup store
//! - A [`Workspace`] facade that drives them like an editor session

pub mod document;
pub mod registry;
pub mod store;
pub mod workspace;

// Re-exports
pub use document::Document;
pub use registry::{MemoryConfiguration, MemoryTextFiles, MemoryUntitled, MemoryWorkingCopies};
pub use store::{BackupSnapshot, MemoryBackupStore, StoreEvent};
pub use workspace::Workspace;
