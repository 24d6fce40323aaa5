//! Deferred tab-close intents.
//!
//! A close button must not remove its own tab while the press/release gesture
//! is still being dispatched. The UI enqueues the intent and the workspace
//! drains the queue on its next idle tick.

use crate::tab::TabKey;

#[derive(Debug, Default)]
pub struct CloseQueue {
    pending: Vec<TabKey>,
}

impl CloseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a close for `key`. Repeated requests for the same key coalesce.
    pub fn enqueue(&mut self, key: &str) -> bool {
        if self.pending.iter().any(|k| k == key) {
            return false;
        }
        self.pending.push(key.to_string());
        true
    }

    /// Take every pending intent, oldest first.
    pub fn drain(&mut self) -> Vec<TabKey> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_coalesce_and_drain_empties() {
        let mut queue = CloseQueue::new();
        assert!(queue.enqueue("/a"));
        assert!(!queue.enqueue("/a"));
        assert!(queue.enqueue("/b"));
        assert_eq!(queue.drain(), vec!["/a".to_string(), "/b".to_string()]);
        assert!(queue.is_empty());
    }
}
