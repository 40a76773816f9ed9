//! Backup tracker
//!
//! Listens to document lifecycle events and keeps recovery backups in step
//! with unsaved state:
//! - dirty content is backed up once edits have been quiet for the debounce
//!   delay, every new edit restarting the delay
//! - saving, reverting, closing or cleaning a document discards its backup
//! - a short auto-save delay suppresses backups of file-backed documents,
//!   untitled documents are always backed up

use crate::debounce::PendingBackups;
use crate::error::Result;
use salvage_core::{
    AutoSaveConfiguration, BackupFileService, BackupModel, ConfigurationService, Emitter,
    Resource, Subscription, Subscriptions, TextFileService, UntitledService, WorkingCopy,
    WorkingCopyService,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

/// Quiet period after the last edit before a backup is written
pub const BACKUP_DEBOUNCE_DELAY: Duration = Duration::from_millis(1000);

/// Collaborators the tracker subscribes to and calls into
#[derive(Clone)]
pub struct TrackerServices {
    pub working_copies: Arc<dyn WorkingCopyService>,
    pub text_files: Arc<dyn TextFileService>,
    pub untitled: Arc<dyn UntitledService>,
    pub configuration: Arc<dyn ConfigurationService>,
    pub backup_files: Arc<dyn BackupFileService>,
}

/// Tracker tuning
#[derive(Debug, Clone)]
pub struct TrackerOptions {
    /// Debounce delay (default: 1s)
    pub debounce_delay: Duration,
    /// Runtime timers run on (default: the runtime `new` is called from)
    pub runtime: Option<Handle>,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            debounce_delay: BACKUP_DEBOUNCE_DELAY,
            runtime: None,
        }
    }
}

/// Schedules and discards working-copy backups
///
/// Dropping the tracker (or calling [`BackupTracker::dispose`]) unsubscribes
/// from every event source and cancels every pending backup.
pub struct BackupTracker {
    inner: Arc<TrackerInner>,
    subscriptions: Subscriptions,
}

struct TrackerInner {
    text_files: Arc<dyn TextFileService>,
    untitled: Arc<dyn UntitledService>,
    backup_files: Arc<dyn BackupFileService>,
    pending: PendingBackups,
    /// Auto-save after a short delay is configured
    suppressed: AtomicBool,
    debounce_delay: Duration,
    runtime: Handle,
}

impl BackupTracker {
    /// Create a tracker and subscribe it to every collaborator
    pub fn new(services: TrackerServices, options: TrackerOptions) -> Result<Self> {
        let runtime = match options.runtime {
            Some(handle) => handle,
            None => Handle::try_current()?,
        };

        let inner = Arc::new(TrackerInner {
            text_files: services.text_files.clone(),
            untitled: services.untitled.clone(),
            backup_files: services.backup_files.clone(),
            pending: PendingBackups::new(),
            suppressed: AtomicBool::new(false),
            debounce_delay: options.debounce_delay,
            runtime,
        });

        // Pick up the current setting before any change notification arrives
        inner.on_auto_save_configuration_changed(&services.configuration.auto_save_configuration());

        let mut subscriptions = Subscriptions::new();

        // Working copy content changes
        subscriptions.push(listen(
            &inner,
            services.working_copies.on_did_change_content(),
            |tracker, copy: &Arc<dyn WorkingCopy>| tracker.on_working_copy_content_changed(copy.as_ref()),
        ));

        // File documents saved, reverted or closed
        subscriptions.push(listen(&inner, services.text_files.on_did_save(), |tracker, r| {
            tracker.on_model_saved(r)
        }));
        subscriptions.push(listen(&inner, services.text_files.on_did_revert(), |tracker, r| {
            tracker.on_model_reverted(r)
        }));
        subscriptions.push(listen(&inner, services.text_files.on_did_dispose(), |tracker, r| {
            tracker.on_model_disposed(r)
        }));

        // Untitled documents
        subscriptions.push(listen(&inner, services.untitled.on_did_create(), |tracker, r| {
            tracker.on_untitled_document_created(r)
        }));
        subscriptions.push(listen(&inner, services.untitled.on_did_dispose(), |tracker, r| {
            tracker.on_untitled_model_disposed(r)
        }));

        // Auto-save configuration
        subscriptions.push(listen(
            &inner,
            services.configuration.on_did_change_auto_save(),
            |tracker, config| tracker.on_auto_save_configuration_changed(config),
        ));

        debug!(
            debounce_ms = options.debounce_delay.as_millis() as u64,
            suppressed = inner.is_suppressed(),
            "Backup tracker started"
        );

        Ok(Self {
            inner,
            subscriptions,
        })
    }

    /// Schedule a backup of a dirty copy, or discard the backup of a clean one
    pub fn on_working_copy_content_changed(&self, copy: &dyn WorkingCopy) {
        self.inner.on_working_copy_content_changed(copy);
    }

    /// Discard the backup of a saved file
    pub fn on_model_saved(&self, resource: &Resource) {
        self.inner.on_model_saved(resource);
    }

    /// Discard the backup of a reverted file
    pub fn on_model_reverted(&self, resource: &Resource) {
        self.inner.on_model_reverted(resource);
    }

    /// Discard the backup of a closed file
    pub fn on_model_disposed(&self, resource: &Resource) {
        self.inner.on_model_disposed(resource);
    }

    /// Schedule a backup if the new untitled document already has content
    pub fn on_untitled_document_created(&self, resource: &Resource) {
        self.inner.on_untitled_document_created(resource);
    }

    /// Discard the backup of a closed untitled document
    pub fn on_untitled_model_disposed(&self, resource: &Resource) {
        self.inner.on_untitled_model_disposed(resource);
    }

    /// Recompute whether file backups are suppressed
    pub fn on_auto_save_configuration_changed(&self, config: &AutoSaveConfiguration) {
        self.inner.on_auto_save_configuration_changed(config);
    }

    /// Number of backups waiting for their debounce delay
    pub fn pending_count(&self) -> usize {
        self.inner.pending.len()
    }

    pub fn has_pending(&self, resource: &Resource) -> bool {
        self.inner.pending.contains(resource)
    }

    /// Backups of file-backed documents are currently suppressed
    pub fn is_suppressed(&self) -> bool {
        self.inner.is_suppressed()
    }

    /// Unsubscribe and cancel every pending backup
    pub fn dispose(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        // No event may reach the tracker once timers start being cancelled
        self.subscriptions.dispose();

        let cancelled = self.inner.pending.cancel_all();
        debug!(cancelled, "Backup tracker disposed");
    }
}

impl Drop for BackupTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Subscribe `handler` without keeping the tracker alive
fn listen<T, F>(inner: &Arc<TrackerInner>, emitter: &Emitter<T>, handler: F) -> Subscription
where
    T: 'static,
    F: Fn(&Arc<TrackerInner>, &T) + Send + Sync + 'static,
{
    let weak: Weak<TrackerInner> = Arc::downgrade(inner);
    emitter.subscribe(move |event| {
        if let Some(tracker) = weak.upgrade() {
            handler(&tracker, event);
        }
    })
}

impl TrackerInner {
    fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst)
    }

    fn on_working_copy_content_changed(self: &Arc<Self>, copy: &dyn WorkingCopy) {
        let resource = copy.resource();

        if !copy.is_dirty() {
            self.discard_backup(resource);
            return;
        }

        // An already pending backup is left to run
        if self.is_suppressed() && !copy.is_untitled() {
            trace!(resource = %resource, "Auto save after short delay configured, skipping backup");
            return;
        }

        let model = if resource.is_untitled() {
            Some(self.untitled.create_or_get(resource))
        } else {
            self.text_files.get(resource)
        };

        match model {
            Some(model) => self.schedule_backup(model),
            None => trace!(resource = %resource, "No model loaded, nothing to back up"),
        }
    }

    fn on_model_saved(&self, resource: &Resource) {
        self.discard_backup(resource);
    }

    fn on_model_reverted(&self, resource: &Resource) {
        self.discard_backup(resource);
    }

    fn on_model_disposed(&self, resource: &Resource) {
        self.discard_backup(resource);
    }

    fn on_untitled_model_disposed(&self, resource: &Resource) {
        self.discard_backup(resource);
    }

    fn on_untitled_document_created(self: &Arc<Self>, resource: &Resource) {
        if self.untitled.is_dirty(resource) {
            let model = self.untitled.create_or_get(resource);
            self.schedule_backup(model);
        }
    }

    fn on_auto_save_configuration_changed(&self, config: &AutoSaveConfiguration) {
        let suppressed = config.suppresses_backups();
        let previous = self.suppressed.swap(suppressed, Ordering::SeqCst);
        if previous != suppressed {
            debug!(
                auto_save_delay_ms = ?config.auto_save_delay_ms,
                suppressed,
                "Auto save configuration changed"
            );
        }
    }

    /// Restart the debounce timer of `model`'s resource
    fn schedule_backup(self: &Arc<Self>, model: Arc<dyn BackupModel>) {
        let resource = model.resource().clone();

        if !model.is_dirty() {
            if self.pending.cancel(&resource) {
                trace!(resource = %resource, "Cancelled pending backup, model is clean");
            }
            return;
        }

        let weak = Arc::downgrade(self);
        let delay = self.debounce_delay;
        let runtime = &self.runtime;

        let seq = self.pending.schedule(&resource, |seq| {
            runtime
                .spawn(run_backup_timer(weak, model, seq, delay))
                .abort_handle()
        });

        trace!(resource = %resource, seq, "Backup scheduled");
    }

    /// Cancel any pending backup and remove the persisted one
    fn discard_backup(&self, resource: &Resource) {
        if self.pending.cancel(resource) {
            trace!(resource = %resource, "Cancelled pending backup");
        }

        // A backup may already have been written, so always ask the store
        let backup_files = self.backup_files.clone();
        let resource = resource.clone();
        self.runtime.spawn(async move {
            if let Err(e) = backup_files.discard_backup(&resource).await {
                warn!(resource = %resource, "Failed to discard backup: {:#}", e);
            }
        });
    }
}

/// Body of one debounce timer
async fn run_backup_timer(
    tracker: Weak<TrackerInner>,
    model: Arc<dyn BackupModel>,
    seq: u64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;

    let Some(tracker) = tracker.upgrade() else {
        return;
    };

    let resource = model.resource();
    if !tracker.pending.complete(resource, seq) {
        // Superseded or cancelled after the timer woke up
        return;
    }
    drop(tracker);

    if !model.is_dirty() {
        trace!(resource = %resource, "Model no longer dirty, skipping backup");
        return;
    }

    match model.backup().await {
        Ok(()) => debug!(resource = %resource, "Backup written"),
        Err(e) => warn!(resource = %resource, "Backup failed: {:#}", e),
    }
}
