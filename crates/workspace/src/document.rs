//! In-memory documents
//!
//! A [`Document`] is both the working copy the registry reports changes for
//! and the model the tracker asks to back itself up.

use crate::store::MemoryBackupStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use salvage_core::{BackupModel, Resource, WorkingCopy, WorkingCopyCapabilities};
use std::sync::Arc;

struct DocumentState {
    content: String,
    /// Last persisted content (empty for untitled documents)
    saved: String,
    /// Bumped on every edit
    version: u64,
}

pub struct Document {
    resource: Resource,
    capabilities: WorkingCopyCapabilities,
    state: Mutex<DocumentState>,
    store: Arc<MemoryBackupStore>,
}

impl Document {
    /// File-backed document whose saved content is `content`
    pub fn file(resource: Resource, content: &str, store: Arc<MemoryBackupStore>) -> Self {
        Self {
            resource,
            capabilities: WorkingCopyCapabilities::NONE,
            state: Mutex::new(DocumentState {
                content: content.to_string(),
                saved: content.to_string(),
                version: 0,
            }),
            store,
        }
    }

    /// Untitled document; dirty as soon as it has any content
    pub fn untitled(resource: Resource, content: &str, store: Arc<MemoryBackupStore>) -> Self {
        Self {
            resource,
            capabilities: WorkingCopyCapabilities::UNTITLED,
            state: Mutex::new(DocumentState {
                content: content.to_string(),
                saved: String::new(),
                version: 0,
            }),
            store,
        }
    }

    pub fn content(&self) -> String {
        self.state.lock().content.clone()
    }

    pub fn version(&self) -> u64 {
        self.state.lock().version
    }

    /// Replace the in-memory content
    pub fn set_content(&self, content: &str) {
        let mut state = self.state.lock();
        state.content = content.to_string();
        state.version += 1;
    }

    /// Mark the current content as persisted
    pub fn mark_saved(&self) {
        let mut state = self.state.lock();
        state.saved = state.content.clone();
    }

    /// Throw away unsaved edits
    pub fn revert(&self) {
        let mut state = self.state.lock();
        if state.content != state.saved {
            state.content = state.saved.clone();
            state.version += 1;
        }
    }
}

impl WorkingCopy for Document {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn is_dirty(&self) -> bool {
        let state = self.state.lock();
        state.content != state.saved
    }

    fn capabilities(&self) -> WorkingCopyCapabilities {
        self.capabilities
    }
}

#[async_trait]
impl BackupModel for Document {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn is_dirty(&self) -> bool {
        WorkingCopy::is_dirty(self)
    }

    async fn backup(&self) -> anyhow::Result<()> {
        let (content, version) = {
            let state = self.state.lock();
            (state.content.clone(), state.version)
        };
        self.store.write(&self.resource, &content, version)?;
        Ok(())
    }
}
