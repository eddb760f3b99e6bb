//! Snackbar queue state.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::SnackbarConfig;
use crate::widgets::events::EventQueue;

use super::item::Snackbar;

/// Identifier handed out by [`SnackbarQueue::show`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnackbarId(u64);

impl std::fmt::Display for SnackbarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__snackbar_{}", self.0)
    }
}

/// Why a snackbar left the screen (or the queue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Its duration elapsed.
    Timeout,
    /// The caller dismissed it.
    Manual,
    /// Its action button was pressed.
    Action,
    /// It was evicted because the queue was full.
    Overflow,
}

/// Notification queued by the snackbar queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnackbarEvent {
    /// A snackbar became visible.
    Shown { id: SnackbarId },
    /// A snackbar was removed.
    Dismissed { id: SnackbarId, reason: DismissReason },
    /// The action button of a snackbar was pressed.
    Action { id: SnackbarId, label: String },
}

/// The snackbar currently on screen.
#[derive(Debug, Clone)]
pub struct ActiveSnackbar {
    pub id: SnackbarId,
    pub snackbar: Snackbar,
    /// When it became visible.
    pub shown_at: Instant,
    /// Resolved visible time.
    pub duration: Duration,
}

impl ActiveSnackbar {
    /// Whether the visible time has elapsed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }

    /// Time left before it expires.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}

/// Application-owned snackbar queue.
#[derive(Debug)]
pub struct SnackbarQueue {
    config: SnackbarConfig,
    pending: VecDeque<(SnackbarId, Snackbar)>,
    visible: Option<ActiveSnackbar>,
    next_id: u64,
    events: EventQueue<SnackbarEvent>,
}

impl Default for SnackbarQueue {
    fn default() -> Self {
        Self::new(SnackbarConfig::default())
    }
}

impl SnackbarQueue {
    /// Create an empty queue.
    pub fn new(config: SnackbarConfig) -> Self {
        Self {
            config,
            pending: VecDeque::new(),
            visible: None,
            next_id: 0,
            events: EventQueue::new(),
        }
    }

    /// Queue a snackbar. It becomes visible on a later [`tick`](Self::tick).
    ///
    /// When the queue is full the oldest waiting snackbar is dropped. One
    /// snackbar can always wait, even with a configured capacity of zero.
    pub fn show(&mut self, snackbar: impl Into<Snackbar>) -> SnackbarId {
        let id = SnackbarId(self.next_id);
        self.next_id += 1;
        self.pending.push_back((id, snackbar.into()));

        let capacity = self.config.capacity.max(1);
        while self.pending.len() > capacity {
            let Some((dropped, _)) = self.pending.pop_front() else {
                break;
            };
            warn!("snackbar queue full, dropping {}", dropped);
            self.events.push(SnackbarEvent::Dismissed {
                id: dropped,
                reason: DismissReason::Overflow,
            });
        }
        id
    }

    /// Advance time: expire the visible snackbar, then promote the next one.
    ///
    /// Returns the id of a snackbar that became visible during this tick.
    pub fn tick(&mut self, now: Instant) -> Option<SnackbarId> {
        if self.visible.as_ref().is_some_and(|active| active.is_expired(now)) {
            self.hide(DismissReason::Timeout);
        }
        if self.visible.is_some() {
            return None;
        }

        let (id, snackbar) = self.pending.pop_front()?;
        let duration = snackbar.duration.unwrap_or_else(|| self.config.duration());
        debug!("showing {} for {:?}", id, duration);
        self.visible = Some(ActiveSnackbar {
            id,
            snackbar,
            shown_at: now,
            duration,
        });
        self.events.push(SnackbarEvent::Shown { id });
        Some(id)
    }

    /// Remove a visible or waiting snackbar. Returns whether it was found.
    pub fn dismiss(&mut self, id: SnackbarId) -> bool {
        if self.visible.as_ref().is_some_and(|active| active.id == id) {
            self.hide(DismissReason::Manual);
            return true;
        }
        let Some(position) = self.pending.iter().position(|(queued, _)| *queued == id) else {
            return false;
        };
        self.pending.remove(position);
        self.events.push(SnackbarEvent::Dismissed {
            id,
            reason: DismissReason::Manual,
        });
        true
    }

    /// Press the action button of the visible snackbar.
    ///
    /// Dismisses it and returns the action label; `None` if nothing is
    /// visible or the visible snackbar has no action.
    pub fn trigger_action(&mut self) -> Option<(SnackbarId, String)> {
        let active = self.visible.as_ref()?;
        let label = active.snackbar.action.clone()?;
        let id = active.id;
        self.events.push(SnackbarEvent::Action {
            id,
            label: label.clone(),
        });
        self.hide(DismissReason::Action);
        Some((id, label))
    }

    /// Drop everything, visible and waiting.
    pub fn clear(&mut self) {
        self.hide(DismissReason::Manual);
        for (id, _) in self.pending.drain(..) {
            self.events.push(SnackbarEvent::Dismissed {
                id,
                reason: DismissReason::Manual,
            });
        }
    }

    fn hide(&mut self, reason: DismissReason) {
        if let Some(active) = self.visible.take() {
            debug!("dismissing {} ({:?})", active.id, reason);
            self.events.push(SnackbarEvent::Dismissed {
                id: active.id,
                reason,
            });
        }
    }

    /// The snackbar on screen.
    pub fn visible(&self) -> Option<&ActiveSnackbar> {
        self.visible.as_ref()
    }

    /// Number of snackbars waiting behind the visible one.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is visible or waiting.
    pub fn is_idle(&self) -> bool {
        self.visible.is_none() && self.pending.is_empty()
    }

    /// Take queued events.
    pub fn drain_events(&mut self) -> Vec<SnackbarEvent> {
        self.events.drain()
    }
}
