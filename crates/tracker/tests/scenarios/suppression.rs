//! Auto-save suppression of file-backed backups

use crate::common::{advance, untitled, Harness};
use salvage_core::{AutoSaveConfiguration, Resource, WorkingCopy, WorkingCopyCapabilities};

#[tokio::test(start_paused = true)]
async fn short_auto_save_delay_suppresses_file_backups() {
    let h = Harness::new();
    let r = h.open("/notes.md", "saved");

    h.ws.set_auto_save(AutoSaveConfiguration::with_delay_ms(500));
    assert!(h.tracker.is_suppressed());

    h.ws.edit(&r, "changed").unwrap();
    assert!(!h.tracker.has_pending(&r));

    advance(2_000).await;
    assert_eq!(h.backups(&r), 0);
}

#[tokio::test(start_paused = true)]
async fn untitled_documents_are_exempt_from_suppression() {
    let h = Harness::new();
    h.ws.set_auto_save(AutoSaveConfiguration::with_delay_ms(500));

    let r = untitled("Untitled-1");
    h.ws.new_untitled(&r, "").unwrap();
    h.ws.edit(&r, "draft").unwrap();
    assert!(h.tracker.has_pending(&r));

    advance(1_001).await;
    assert_eq!(h.backups(&r), 1);
}

#[tokio::test(start_paused = true)]
async fn suppression_leaves_earlier_pending_backup_running() {
    let h = Harness::new();
    let r = h.open("/notes.md", "saved");

    h.ws.edit(&r, "first").unwrap();
    h.ws.set_auto_save(AutoSaveConfiguration::with_delay_ms(500));
    h.ws.edit(&r, "second").unwrap();

    // The entry from before suppression is neither cancelled nor restarted
    assert!(h.tracker.has_pending(&r));

    advance(1_001).await;
    assert_eq!(h.backups(&r), 1);
    assert_eq!(h.ws.backups.get(&r).unwrap().content, "second");
}

#[tokio::test(start_paused = true)]
async fn suppressed_clean_change_still_discards() {
    let h = Harness::with_config(AutoSaveConfiguration::with_delay_ms(100));
    let r = h.open("/notes.md", "saved");

    h.ws.edit(&r, "changed").unwrap();
    h.ws.edit(&r, "saved").unwrap();
    advance(10).await;

    assert_eq!(h.discards(&r), 1);
}

#[tokio::test(start_paused = true)]
async fn threshold_and_initial_configuration() {
    let suppressed = Harness::with_config(AutoSaveConfiguration::with_delay_ms(1_499));
    assert!(suppressed.tracker.is_suppressed());

    let h = Harness::with_config(AutoSaveConfiguration::with_delay_ms(1_500));
    assert!(!h.tracker.is_suppressed());

    h.ws.set_auto_save(AutoSaveConfiguration::with_delay_ms(1_000));
    assert!(h.tracker.is_suppressed());

    // No delay configured at all
    h.ws.set_auto_save(AutoSaveConfiguration::default());
    assert!(!h.tracker.is_suppressed());
}

#[tokio::test(start_paused = true)]
async fn lifting_suppression_resumes_file_backups() {
    let h = Harness::with_config(AutoSaveConfiguration::with_delay_ms(500));
    let r = h.open("/notes.md", "saved");

    h.ws.edit(&r, "one").unwrap();
    assert!(!h.tracker.has_pending(&r));

    h.ws.set_auto_save(AutoSaveConfiguration::with_delay_ms(5_000));
    h.ws.edit(&r, "two").unwrap();
    assert!(h.tracker.has_pending(&r));

    advance(1_001).await;
    assert_eq!(h.backups(&r), 1);
}

/// Working copy whose capability bits are chosen independently of its scheme
struct FlaggedCopy {
    resource: Resource,
    capabilities: WorkingCopyCapabilities,
}

impl WorkingCopy for FlaggedCopy {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn is_dirty(&self) -> bool {
        true
    }

    fn capabilities(&self) -> WorkingCopyCapabilities {
        self.capabilities
    }
}

#[tokio::test(start_paused = true)]
async fn untitled_capability_exempts_file_scheme_copy() {
    let h = Harness::with_config(AutoSaveConfiguration::with_delay_ms(500));
    let r = h.open("/notes.md", "saved");
    h.ws.document(&r).unwrap().set_content("changed");

    h.tracker.on_working_copy_content_changed(&FlaggedCopy {
        resource: r.clone(),
        capabilities: WorkingCopyCapabilities::UNTITLED,
    });

    // Exempt by capability, resolved through the file registry by scheme
    assert!(h.tracker.has_pending(&r));
    advance(1_001).await;
    assert_eq!(h.backups(&r), 1);
    assert_eq!(h.ws.backups.get(&r).unwrap().content, "changed");
}

#[tokio::test(start_paused = true)]
async fn untitled_scheme_without_capability_is_suppressed() {
    let h = Harness::with_config(AutoSaveConfiguration::with_delay_ms(500));
    let u = untitled("Untitled-1");
    h.ws.new_untitled(&u, "").unwrap();
    h.ws.document(&u).unwrap().set_content("draft");

    h.tracker.on_working_copy_content_changed(&FlaggedCopy {
        resource: u.clone(),
        capabilities: WorkingCopyCapabilities::NONE,
    });

    assert!(!h.tracker.has_pending(&u));
    advance(2_000).await;
    assert_eq!(h.backups(&u), 0);
}
