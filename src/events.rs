//! Change notifications for the tab list and active tab.
//!
//! Listeners are plain callbacks registered on the workspace; they run
//! synchronously after the operation that produced the change has finished
//! reconciling, so they always observe a consistent state.

use crate::tab::{Tab, TabKey};

/// Something observable about the workspace changed.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceEvent {
    /// The tab list changed (open, close, relabel, replace, reset)
    TabsChanged(Vec<Tab>),
    /// The active tab changed
    ActiveTabChanged(Option<TabKey>),
    /// The workspace asked the router to navigate
    Navigated { path: String, replace_history: bool },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&WorkspaceEvent)>;

/// Registered listeners, notified in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        before != self.entries.len()
    }

    pub(crate) fn notify(&mut self, event: &WorkspaceEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
