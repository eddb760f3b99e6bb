//! Tests for the snackbar queue.

use std::time::{Duration, Instant};

use sprig::prelude::*;
use sprig::widgets::DismissReason;

#[test]
fn test_fifo_one_visible() {
    let mut queue = SnackbarQueue::default();
    let first = queue.show("Saved");
    let second = queue.show(Snackbar::error("Upload failed"));
    assert!(queue.visible().is_none());

    let now = Instant::now();
    assert_eq!(queue.tick(now), Some(first));
    assert_eq!(queue.tick(now), None);
    assert_eq!(queue.visible().map(|a| a.id), Some(first));
    assert_eq!(queue.pending_len(), 1);

    assert!(queue.dismiss(first));
    assert_eq!(queue.tick(now), Some(second));
    assert_eq!(
        queue.visible().map(|a| a.snackbar.level),
        Some(SnackbarLevel::Error)
    );
}

#[test]
fn test_expiry_uses_duration() {
    let config = SnackbarConfig::default().default_duration(Duration::from_secs(2));
    let mut queue = SnackbarQueue::new(config);
    let short = queue.show(Snackbar::info("short").with_duration(Duration::from_millis(500)));
    let long = queue.show("default");

    let start = Instant::now();
    queue.tick(start);
    assert_eq!(queue.tick(start + Duration::from_millis(499)), None);
    assert_eq!(queue.visible().map(|a| a.id), Some(short));

    assert_eq!(queue.tick(start + Duration::from_millis(500)), Some(long));
    let shown_at = start + Duration::from_millis(500);
    assert_eq!(queue.visible().map(|a| a.duration), Some(Duration::from_secs(2)));
    assert_eq!(
        queue.visible().map(|a| a.remaining(shown_at + Duration::from_secs(1))),
        Some(Duration::from_secs(1))
    );

    assert_eq!(queue.tick(shown_at + Duration::from_secs(2)), None);
    assert!(queue.is_idle());

    let events = queue.drain_events();
    assert!(events.contains(&SnackbarEvent::Dismissed {
        id: short,
        reason: DismissReason::Timeout
    }));
    assert!(events.contains(&SnackbarEvent::Dismissed {
        id: long,
        reason: DismissReason::Timeout
    }));
}

#[test]
fn test_overflow_drops_oldest_queued() {
    let mut queue = SnackbarQueue::new(SnackbarConfig::default().capacity(2));
    let now = Instant::now();
    let visible = queue.show("visible");
    queue.tick(now);

    let a = queue.show("a");
    let b = queue.show("b");
    let c = queue.show("c");
    assert_eq!(queue.pending_len(), 2);
    assert_eq!(queue.visible().map(|v| v.id), Some(visible));

    let events = queue.drain_events();
    assert_eq!(
        events.last(),
        Some(&SnackbarEvent::Dismissed {
            id: a,
            reason: DismissReason::Overflow
        })
    );

    queue.dismiss(visible);
    assert_eq!(queue.tick(now), Some(b));
    queue.dismiss(b);
    assert_eq!(queue.tick(now), Some(c));
}

#[test]
fn test_trigger_action() {
    let mut queue = SnackbarQueue::default();
    let plain = queue.show("no action");
    let undo = queue.show(Snackbar::success("Deleted").with_action("Undo"));
    let now = Instant::now();

    queue.tick(now);
    assert_eq!(queue.trigger_action(), None);
    queue.dismiss(plain);
    queue.tick(now);

    assert_eq!(queue.trigger_action(), Some((undo, "Undo".to_string())));
    assert!(queue.visible().is_none());
    let events = queue.drain_events();
    assert!(events.contains(&SnackbarEvent::Action {
        id: undo,
        label: "Undo".to_string()
    }));
}

#[test]
fn test_dismiss_queued_and_unknown() {
    let mut queue = SnackbarQueue::default();
    let a = queue.show("a");
    assert!(queue.dismiss(a));
    assert!(!queue.dismiss(a));
    assert!(queue.is_idle());
}

#[test]
fn test_clear() {
    let mut queue = SnackbarQueue::default();
    queue.show("a");
    queue.show("b");
    queue.tick(Instant::now());
    queue.clear();
    assert!(queue.is_idle());
    assert_eq!(queue.drain_events().len(), 3);
}

#[test]
fn test_zero_capacity_keeps_latest() {
    let mut queue = SnackbarQueue::new(SnackbarConfig::default().capacity(0));
    let first = queue.show("first");
    let second = queue.show("second");
    assert_eq!(queue.pending_len(), 1);

    assert_eq!(queue.tick(Instant::now()), Some(second));
    assert_eq!(
        queue.drain_events(),
        vec![
            SnackbarEvent::Dismissed {
                id: first,
                reason: DismissReason::Overflow
            },
            SnackbarEvent::Shown { id: second },
        ]
    );
}
