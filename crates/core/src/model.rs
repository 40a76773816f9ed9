//! Collaborator capabilities the backup tracker depends on
//!
//! The tracker never sees concrete document types. File-backed and untitled
//! documents both surface as [`BackupModel`]; the registries that own them
//! surface as the service traits below.

use crate::config::AutoSaveConfiguration;
use crate::event::Emitter;
use crate::resource::Resource;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability bits of a working copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WorkingCopyCapabilities(u8);

impl WorkingCopyCapabilities {
    pub const NONE: Self = Self(0);
    /// Never saved to a durable location
    pub const UNTITLED: Self = Self(1);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// In-memory state of a document as reported by the working-copy registry
pub trait WorkingCopy: Send + Sync {
    fn resource(&self) -> &Resource;

    /// Has unsaved changes
    fn is_dirty(&self) -> bool;

    fn capabilities(&self) -> WorkingCopyCapabilities;

    fn is_untitled(&self) -> bool {
        self.capabilities()
            .contains(WorkingCopyCapabilities::UNTITLED)
    }
}

/// Editable model that can serialize itself to the backup store
#[async_trait]
pub trait BackupModel: Send + Sync {
    fn resource(&self) -> &Resource;

    fn is_dirty(&self) -> bool;

    /// Serialize current content into the backup store
    async fn backup(&self) -> anyhow::Result<()>;
}

/// Registry publishing content changes of every working copy
pub trait WorkingCopyService: Send + Sync {
    fn on_did_change_content(&self) -> &Emitter<Arc<dyn WorkingCopy>>;
}

/// Registry of file-backed document models
pub trait TextFileService: Send + Sync {
    /// Model for `resource`, if one is currently loaded
    fn get(&self, resource: &Resource) -> Option<Arc<dyn BackupModel>>;

    fn on_did_save(&self) -> &Emitter<Resource>;

    fn on_did_revert(&self) -> &Emitter<Resource>;

    fn on_did_dispose(&self) -> &Emitter<Resource>;
}

/// Registry of untitled (never saved) document models
pub trait UntitledService: Send + Sync {
    fn create_or_get(&self, resource: &Resource) -> Arc<dyn BackupModel>;

    fn is_dirty(&self, resource: &Resource) -> bool;

    fn on_did_create(&self) -> &Emitter<Resource>;

    fn on_did_dispose(&self) -> &Emitter<Resource>;
}

/// Source of the auto-save configuration
pub trait ConfigurationService: Send + Sync {
    fn auto_save_configuration(&self) -> AutoSaveConfiguration;

    fn on_did_change_auto_save(&self) -> &Emitter<AutoSaveConfiguration>;
}

/// Persistent store of backups
#[async_trait]
pub trait BackupFileService: Send + Sync {
    /// Remove any persisted backup for `resource`; absent backups are not an error
    async fn discard_backup(&self, resource: &Resource) -> anyhow::Result<()>;
}
