//! Editor session facade
//!
//! Drives the in-memory registries the way an editor would: each user
//! action mutates a document and then publishes the matching notification.

use crate::document::Document;
use crate::registry::{MemoryConfiguration, MemoryTextFiles, MemoryUntitled, MemoryWorkingCopies};
use crate::store::MemoryBackupStore;
use anyhow::Result;
use salvage_core::{AutoSaveConfiguration, Resource, WorkingCopy};
use std::sync::Arc;
use tracing::debug;

/// Every collaborator of the backup tracker, backed by memory
pub struct Workspace {
    pub working_copies: Arc<MemoryWorkingCopies>,
    pub text_files: Arc<MemoryTextFiles>,
    pub untitled: Arc<MemoryUntitled>,
    pub configuration: Arc<MemoryConfiguration>,
    pub backups: Arc<MemoryBackupStore>,
}

impl Workspace {
    pub fn new(config: AutoSaveConfiguration) -> Self {
        let backups = Arc::new(MemoryBackupStore::new());
        Self {
            working_copies: Arc::new(MemoryWorkingCopies::new()),
            text_files: Arc::new(MemoryTextFiles::new()),
            untitled: Arc::new(MemoryUntitled::new(backups.clone())),
            configuration: Arc::new(MemoryConfiguration::new(config)),
            backups,
        }
    }

    /// Open a file-backed document with its saved content
    pub fn open(&self, resource: &Resource, content: &str) -> Arc<Document> {
        let document = Arc::new(Document::file(resource.clone(), content, self.backups.clone()));
        self.text_files.insert(document.clone());
        debug!(resource = %resource, "Opened document");
        document
    }

    /// Create a new untitled document
    pub fn new_untitled(&self, resource: &Resource, content: &str) -> Result<Arc<Document>> {
        if !resource.is_untitled() {
            anyhow::bail!("Not an untitled resource: {}", resource);
        }
        Ok(self.untitled.create(resource.clone(), content))
    }

    /// Replace a document's content and publish the change
    pub fn edit(&self, resource: &Resource, content: &str) -> Result<()> {
        let document = self.document(resource)?;
        document.set_content(content);
        self.working_copies
            .notify_content_changed(document as Arc<dyn WorkingCopy>);
        Ok(())
    }

    /// Persist a file-backed document
    pub fn save(&self, resource: &Resource) -> Result<()> {
        let document = self
            .text_files
            .document(resource)
            .ok_or_else(|| anyhow::anyhow!("No open file document: {}", resource))?;
        document.mark_saved();
        self.text_files.notify_saved(resource);
        Ok(())
    }

    /// Drop unsaved edits of a file-backed document
    pub fn revert(&self, resource: &Resource) -> Result<()> {
        let document = self
            .text_files
            .document(resource)
            .ok_or_else(|| anyhow::anyhow!("No open file document: {}", resource))?;
        document.revert();
        self.text_files.notify_reverted(resource);
        Ok(())
    }

    /// Close a document of either kind
    pub fn close(&self, resource: &Resource) -> Result<()> {
        if resource.is_untitled() {
            self.untitled
                .remove(resource)
                .ok_or_else(|| anyhow::anyhow!("No untitled document: {}", resource))?;
            self.untitled.notify_disposed(resource);
        } else {
            self.text_files
                .remove(resource)
                .ok_or_else(|| anyhow::anyhow!("No open file document: {}", resource))?;
            self.text_files.notify_disposed(resource);
        }
        Ok(())
    }

    pub fn set_auto_save(&self, config: AutoSaveConfiguration) {
        self.configuration.update(config);
    }

    pub fn document(&self, resource: &Resource) -> Result<Arc<Document>> {
        let found = if resource.is_untitled() {
            self.untitled.document(resource)
        } else {
            self.text_files.document(resource)
        };
        found.ok_or_else(|| anyhow::anyhow!("Unknown document: {}", resource))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(AutoSaveConfiguration::default())
    }
}
