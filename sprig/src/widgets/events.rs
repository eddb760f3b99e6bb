//! Widget event queue.
//!
//! Widgets push events while handling a command. The host drains the
//! queue after each user interaction and dispatches its own handlers.

use std::collections::VecDeque;

/// FIFO of events produced by a widget.
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    pending: VecDeque<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<E> EventQueue<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    pub fn push(&mut self, event: E) {
        self.pending.push_back(event);
    }

    /// Take every pending event in the order it was pushed.
    pub fn drain(&mut self) -> Vec<E> {
        self.pending.drain(..).collect()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = EventQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.drain(), vec![1, 2, 3]);
        assert!(queue.is_empty());
    }
}
