//! Debounce timing of backups

use crate::common::{advance, file, Harness};
use salvage_core::{Resource, WorkingCopy, WorkingCopyCapabilities};

#[tokio::test(start_paused = true)]
async fn dirty_edit_is_backed_up_after_delay() {
    let h = Harness::new();
    let r = h.open("/notes.md", "saved");

    h.ws.edit(&r, "unsaved").unwrap();
    assert!(h.tracker.has_pending(&r));

    advance(999).await;
    assert_eq!(h.backups(&r), 0);

    advance(2).await;
    assert_eq!(h.backups(&r), 1);
    assert!(!h.tracker.has_pending(&r));
    assert_eq!(h.ws.backups.get(&r).unwrap().content, "unsaved");
}

#[tokio::test(start_paused = true)]
async fn second_edit_restarts_the_delay() {
    let h = Harness::new();
    let r = h.open("/notes.md", "saved");

    // t=0
    h.ws.edit(&r, "one").unwrap();

    // t=500
    advance(500).await;
    h.ws.edit(&r, "one two").unwrap();
    assert_eq!(h.tracker.pending_count(), 1);

    // t=1499: the t=1000 firing never happened
    advance(999).await;
    assert_eq!(h.backups(&r), 0);

    // t=1501
    advance(2).await;
    assert_eq!(h.backups(&r), 1);
    assert_eq!(h.ws.backups.get(&r).unwrap().content, "one two");

    // Nothing else fires later
    advance(5_000).await;
    assert_eq!(h.backups(&r), 1);
}

#[tokio::test(start_paused = true)]
async fn at_most_one_pending_entry_per_resource() {
    let h = Harness::new();
    let a = h.open("/a.txt", "a");
    let b = h.open("/b.txt", "b");

    for i in 0..20 {
        h.ws.edit(&a, &format!("a{i}")).unwrap();
        h.ws.edit(&b, &format!("b{i}")).unwrap();
        assert_eq!(h.tracker.pending_count(), 2);
        advance(100).await;
    }

    advance(1_000).await;
    assert_eq!(h.backups(&a), 1);
    assert_eq!(h.backups(&b), 1);
    assert_eq!(h.tracker.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn clean_before_delay_means_no_backup() {
    let h = Harness::new();
    let r = h.open("/notes.md", "saved");

    h.ws.edit(&r, "typo").unwrap();
    advance(300).await;
    // Typing back to the saved text makes the document clean
    h.ws.edit(&r, "saved").unwrap();
    assert!(!h.tracker.has_pending(&r));

    advance(2_000).await;
    assert_eq!(h.backups(&r), 0);
    assert_eq!(h.discards(&r), 1);
}

#[tokio::test(start_paused = true)]
async fn timer_rechecks_dirtiness_when_it_fires() {
    let h = Harness::new();
    let r = h.open("/notes.md", "saved");

    h.ws.edit(&r, "changed").unwrap();

    // Cleaned without a notification reaching the tracker
    let doc = h.ws.document(&r).unwrap();
    doc.set_content("saved");

    advance(1_001).await;
    assert_eq!(h.backups(&r), 0);
    assert!(!h.tracker.has_pending(&r));
}

#[tokio::test(start_paused = true)]
async fn failed_backup_is_not_retried() {
    let h = Harness::new();
    let r = h.open("/notes.md", "saved");

    h.ws.backups.set_failing(true);
    h.ws.edit(&r, "changed").unwrap();
    advance(1_001).await;
    assert!(!h.tracker.has_pending(&r));

    h.ws.backups.set_failing(false);
    advance(10_000).await;
    assert_eq!(h.backups(&r), 0);
}

struct DetachedCopy {
    resource: Resource,
}

impl WorkingCopy for DetachedCopy {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn is_dirty(&self) -> bool {
        true
    }

    fn capabilities(&self) -> WorkingCopyCapabilities {
        WorkingCopyCapabilities::NONE
    }
}

#[tokio::test(start_paused = true)]
async fn unresolvable_model_is_ignored() {
    let h = Harness::new();
    let copy = DetachedCopy {
        resource: file("/not-loaded.txt"),
    };

    h.tracker.on_working_copy_content_changed(&copy);

    assert_eq!(h.tracker.pending_count(), 0);
    advance(2_000).await;
    assert!(h.ws.backups.events().is_empty());
}
