//! In-memory registries and configuration provider

use crate::document::Document;
use crate::store::MemoryBackupStore;
use parking_lot::{Mutex, RwLock};
use salvage_core::{
    AutoSaveConfiguration, BackupModel, ConfigurationService, Emitter, Resource, TextFileService,
    UntitledService, WorkingCopy, WorkingCopyService,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Publishes content changes of every working copy
#[derive(Default)]
pub struct MemoryWorkingCopies {
    content_changed: Emitter<Arc<dyn WorkingCopy>>,
}

impl MemoryWorkingCopies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify_content_changed(&self, copy: Arc<dyn WorkingCopy>) {
        self.content_changed.fire(&copy);
    }
}

impl WorkingCopyService for MemoryWorkingCopies {
    fn on_did_change_content(&self) -> &Emitter<Arc<dyn WorkingCopy>> {
        &self.content_changed
    }
}

/// File-backed documents that are currently open
#[derive(Default)]
pub struct MemoryTextFiles {
    models: RwLock<HashMap<Resource, Arc<Document>>>,
    saved: Emitter<Resource>,
    reverted: Emitter<Resource>,
    disposed: Emitter<Resource>,
}

impl MemoryTextFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, document: Arc<Document>) {
        let resource = WorkingCopy::resource(document.as_ref()).clone();
        self.models.write().insert(resource, document);
    }

    pub fn document(&self, resource: &Resource) -> Option<Arc<Document>> {
        self.models.read().get(resource).cloned()
    }

    pub fn remove(&self, resource: &Resource) -> Option<Arc<Document>> {
        self.models.write().remove(resource)
    }

    pub fn notify_saved(&self, resource: &Resource) {
        self.saved.fire(resource);
    }

    pub fn notify_reverted(&self, resource: &Resource) {
        self.reverted.fire(resource);
    }

    pub fn notify_disposed(&self, resource: &Resource) {
        self.disposed.fire(resource);
    }
}

impl TextFileService for MemoryTextFiles {
    fn get(&self, resource: &Resource) -> Option<Arc<dyn BackupModel>> {
        self.document(resource)
            .map(|doc| doc as Arc<dyn BackupModel>)
    }

    fn on_did_save(&self) -> &Emitter<Resource> {
        &self.saved
    }

    fn on_did_revert(&self) -> &Emitter<Resource> {
        &self.reverted
    }

    fn on_did_dispose(&self) -> &Emitter<Resource> {
        &self.disposed
    }
}

/// Untitled documents, created lazily on lookup
pub struct MemoryUntitled {
    models: RwLock<HashMap<Resource, Arc<Document>>>,
    store: Arc<MemoryBackupStore>,
    created: Emitter<Resource>,
    disposed: Emitter<Resource>,
}

impl MemoryUntitled {
    pub fn new(store: Arc<MemoryBackupStore>) -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
            store,
            created: Emitter::new(),
            disposed: Emitter::new(),
        }
    }

    /// Create an untitled document with initial content and announce it
    pub fn create(&self, resource: Resource, content: &str) -> Arc<Document> {
        let document = Arc::new(Document::untitled(resource.clone(), content, self.store.clone()));
        self.models.write().insert(resource.clone(), document.clone());
        self.created.fire(&resource);
        document
    }

    pub fn document(&self, resource: &Resource) -> Option<Arc<Document>> {
        self.models.read().get(resource).cloned()
    }

    pub fn remove(&self, resource: &Resource) -> Option<Arc<Document>> {
        self.models.write().remove(resource)
    }

    pub fn notify_disposed(&self, resource: &Resource) {
        self.disposed.fire(resource);
    }
}

impl UntitledService for MemoryUntitled {
    fn create_or_get(&self, resource: &Resource) -> Arc<dyn BackupModel> {
        let mut models = self.models.write();
        let document = models
            .entry(resource.clone())
            .or_insert_with(|| Arc::new(Document::untitled(resource.clone(), "", self.store.clone())))
            .clone();
        document
    }

    fn is_dirty(&self, resource: &Resource) -> bool {
        self.document(resource)
            .map(|doc| WorkingCopy::is_dirty(doc.as_ref()))
            .unwrap_or(false)
    }

    fn on_did_create(&self) -> &Emitter<Resource> {
        &self.created
    }

    fn on_did_dispose(&self) -> &Emitter<Resource> {
        &self.disposed
    }
}

/// Auto-save settings that can be changed at runtime
#[derive(Default)]
pub struct MemoryConfiguration {
    current: Mutex<AutoSaveConfiguration>,
    changed: Emitter<AutoSaveConfiguration>,
}

impl MemoryConfiguration {
    pub fn new(initial: AutoSaveConfiguration) -> Self {
        Self {
            current: Mutex::new(initial),
            changed: Emitter::new(),
        }
    }

    pub fn update(&self, config: AutoSaveConfiguration) {
        *self.current.lock() = config;
        self.changed.fire(&config);
    }
}

impl ConfigurationService for MemoryConfiguration {
    fn auto_save_configuration(&self) -> AutoSaveConfiguration {
        *self.current.lock()
    }

    fn on_did_change_auto_save(&self) -> &Emitter<AutoSaveConfiguration> {
        &self.changed
    }
}
