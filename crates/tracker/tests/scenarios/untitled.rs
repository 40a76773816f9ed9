//! Untitled document handling

use crate::common::{advance, settle, untitled, Harness};

#[tokio::test(start_paused = true)]
async fn dirty_untitled_is_scheduled_on_creation() {
    let h = Harness::new();
    let r = untitled("Untitled-1");

    h.ws.new_untitled(&r, "restored text").unwrap();
    assert!(h.tracker.has_pending(&r));

    advance(1_001).await;
    assert_eq!(h.backups(&r), 1);
    assert_eq!(h.ws.backups.get(&r).unwrap().content, "restored text");
}

#[tokio::test(start_paused = true)]
async fn empty_untitled_is_not_scheduled() {
    let h = Harness::new();
    let r = untitled("Untitled-1");

    h.ws.new_untitled(&r, "").unwrap();
    assert!(!h.tracker.has_pending(&r));

    advance(2_000).await;
    assert_eq!(h.backups(&r), 0);
}

#[tokio::test(start_paused = true)]
async fn disposing_untitled_discards_backup() {
    let h = Harness::new();
    let r = untitled("Untitled-2");

    h.ws.new_untitled(&r, "").unwrap();
    h.ws.edit(&r, "draft").unwrap();
    assert!(h.tracker.has_pending(&r));

    h.ws.close(&r).unwrap();
    settle().await;

    assert!(!h.tracker.has_pending(&r));
    assert_eq!(h.discards(&r), 1);

    advance(2_000).await;
    assert_eq!(h.backups(&r), 0);
}

#[tokio::test(start_paused = true)]
async fn clearing_untitled_content_discards() {
    let h = Harness::new();
    let r = untitled("Untitled-3");

    h.ws.new_untitled(&r, "").unwrap();
    h.ws.edit(&r, "draft").unwrap();
    advance(1_001).await;
    assert!(h.ws.backups.has_backup(&r));

    h.ws.edit(&r, "").unwrap();
    settle().await;

    assert!(!h.ws.backups.has_backup(&r));
}
