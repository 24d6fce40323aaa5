//! Router adapter contract and an in-memory router.
//!
//! The workspace never owns navigation state; it reads the current path from
//! a `RouterAdapter` and asks it to navigate. `MemoryRouter` implements the
//! contract with a history stack for tests and scenario replay.

use parking_lot::Mutex;
use std::sync::Arc;

/// Opaque data carried alongside a navigation (e.g. a prefilled form).
pub type NavigationPayload = serde_json::Value;

/// Options for `RouterAdapter::navigate`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
    /// Overwrite the current history entry instead of pushing a new one
    pub replace_history: bool,
    /// Payload the destination screen can read back once
    pub payload: Option<NavigationPayload>,
}

impl NavigateOptions {
    /// Push a new history entry
    pub fn push() -> Self {
        Self::default()
    }

    /// Replace the current history entry
    pub fn replace() -> Self {
        Self {
            replace_history: true,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Option<NavigationPayload>) -> Self {
        self.payload = payload;
        self
    }
}

/// URL-addressable router consumed by the workspace.
pub trait RouterAdapter {
    /// The path currently displayed
    fn current_path(&self) -> String;

    /// Navigate to `path`
    fn navigate(&self, path: &str, options: NavigateOptions);

    /// The payload of the latest navigation; consumed by the first read
    fn take_navigation_payload(&self) -> Option<NavigationPayload>;
}

/// A navigation issued through `RouterAdapter::navigate`.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRecord {
    pub path: String,
    pub replace_history: bool,
}

#[derive(Debug)]
struct MemoryRouterState {
    history: Vec<String>,
    /// Index of the displayed entry in `history`
    cursor: usize,
    payload: Option<NavigationPayload>,
    navigations: Vec<NavigationRecord>,
}

/// In-memory router with a browser-like history stack.
///
/// Cloning yields another handle to the same router, so a test can keep one
/// handle while the workspace owns another.
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    state: Arc<Mutex<MemoryRouterState>>,
}

impl MemoryRouter {
    /// Create a router displaying `initial_path`
    pub fn new(initial_path: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryRouterState {
                history: vec![initial_path.to_string()],
                cursor: 0,
                payload: None,
                navigations: Vec::new(),
            })),
        }
    }

    /// Simulate the user reaching `path` directly (address bar, link, reload).
    ///
    /// Pushes a history entry but is not recorded as a workspace navigation.
    pub fn visit(&self, path: &str) {
        let mut state = self.state.lock();
        Self::push_entry(&mut state, path);
        state.payload = None;
    }

    /// Step back in history. Returns false at the oldest entry.
    pub fn back(&self) -> bool {
        let mut state = self.state.lock();
        if state.cursor == 0 {
            return false;
        }
        state.cursor -= 1;
        state.payload = None;
        true
    }

    /// History entries up to and including the displayed one
    pub fn history(&self) -> Vec<String> {
        let state = self.state.lock();
        state.history[..=state.cursor].to_vec()
    }

    /// Navigations issued through the adapter contract, oldest first
    pub fn navigations(&self) -> Vec<NavigationRecord> {
        self.state.lock().navigations.clone()
    }

    /// The most recent navigation issued through the adapter contract
    pub fn last_navigation(&self) -> Option<NavigationRecord> {
        self.state.lock().navigations.last().cloned()
    }

    /// Forget recorded navigations (history is kept)
    pub fn clear_navigations(&self) {
        self.state.lock().navigations.clear();
    }

    fn push_entry(state: &mut MemoryRouterState, path: &str) {
        let keep = state.cursor + 1;
        state.history.truncate(keep);
        state.history.push(path.to_string());
        state.cursor = state.history.len() - 1;
    }
}

impl RouterAdapter for MemoryRouter {
    fn current_path(&self) -> String {
        let state = self.state.lock();
        state.history[state.cursor].clone()
    }

    fn navigate(&self, path: &str, options: NavigateOptions) {
        let mut state = self.state.lock();
        if options.replace_history {
            let cursor = state.cursor;
            state.history[cursor] = path.to_string();
        } else {
            Self::push_entry(&mut state, path);
        }
        state.payload = options.payload;
        state.navigations.push(NavigationRecord {
            path: path.to_string(),
            replace_history: options.replace_history,
        });
    }

    fn take_navigation_payload(&self) -> Option<NavigationPayload> {
        self.state.lock().payload.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn push_and_replace_history() {
        let router = MemoryRouter::new("/");
        router.navigate("/a", NavigateOptions::push());
        router.navigate("/b", NavigateOptions::replace());
        assert_eq!(router.current_path(), "/b");
        assert_eq!(router.history(), vec!["/", "/b"]);
        assert_eq!(
            router.last_navigation(),
            Some(NavigationRecord {
                path: "/b".to_string(),
                replace_history: true,
            })
        );
    }

    #[test]
    fn payload_is_read_once() {
        let router = MemoryRouter::new("/");
        router.navigate(
            "/quotes/new",
            NavigateOptions::push().with_payload(Some(json!({"customer": 42}))),
        );
        assert_eq!(router.take_navigation_payload(), Some(json!({"customer": 42})));
        assert_eq!(router.take_navigation_payload(), None);
    }

    #[test]
    fn back_drops_forward_entries_on_next_push() {
        let router = MemoryRouter::new("/");
        router.visit("/a");
        router.visit("/b");
        assert!(router.back());
        assert_eq!(router.current_path(), "/a");
        router.visit("/c");
        assert_eq!(router.history(), vec!["/", "/a", "/c"]);
        assert!(router.navigations().is_empty(), "visits are not recorded");
    }

    #[test]
    fn back_stops_at_oldest_entry() {
        let router = MemoryRouter::new("/");
        assert!(!router.back());
        assert_eq!(router.current_path(), "/");
    }
}
