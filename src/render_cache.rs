//! Retained UI subtrees, one per open tab path.
//!
//! A hidden tab keeps its subtree (scroll position, unsaved form fields,
//! in-flight fetches) so switching back does not rebuild it. Entries are only
//! dropped once their tab has closed.

use std::collections::{HashMap, HashSet};

/// Cache of previously produced views keyed by tab path.
#[derive(Debug)]
pub struct RenderCache<V> {
    entries: HashMap<String, V>,
}

impl<V> Default for RenderCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RenderCache<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Return the cached view for `path`, producing it with `render_fn` the
    /// first time.
    pub fn ensure(&mut self, path: &str, render_fn: impl FnOnce() -> V) -> &V {
        self.entries.entry(path.to_string()).or_insert_with(|| {
            log::debug!("Rendering new view for {}", path);
            render_fn()
        })
    }

    /// Drop every entry whose path is not open. Returns how many were dropped.
    pub fn prune(&mut self, open_paths: &HashSet<&str>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| open_paths.contains(path.as_str()));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            log::debug!("Pruned {} cached view(s)", dropped);
        }
        dropped
    }

    /// Move the entry at `old_path` to `new_path`.
    ///
    /// Any entry already at `new_path` is replaced. Returns false if nothing
    /// was cached under `old_path`.
    pub fn migrate(&mut self, old_path: &str, new_path: &str) -> bool {
        if old_path == new_path {
            return self.entries.contains_key(old_path);
        }
        match self.entries.remove(old_path) {
            Some(view) => {
                self.entries.insert(new_path.to_string(), view);
                log::debug!("Migrated cached view {} -> {}", old_path, new_path);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, path: &str) -> Option<&V> {
        self.entries.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut V> {
        self.entries.get_mut(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
