//! Tab registry: the ordered list of open tabs and the active tab key.

use super::{Tab, TabDescriptor, TabKey};
use std::collections::HashSet;

/// Owns the open tabs of a workspace, in creation order.
///
/// Every operation is total: unknown keys and paths are no-ops. The registry
/// never navigates and never picks a replacement active tab on its own; that
/// is the reconciler's job.
#[derive(Debug)]
pub struct TabRegistry {
    /// All tabs, in order. Index 0 is the permanent tab.
    tabs: Vec<Tab>,
    /// Currently active tab key
    active_key: Option<TabKey>,
    /// Bumped on every change to `tabs`; observers compare it to detect edits
    revision: u64,
}

impl TabRegistry {
    /// Create a registry holding only the permanent tab, which is active.
    pub fn new(home_path: &str, home_label: &str) -> Self {
        let home = Tab::permanent(home_path, home_label);
        let active_key = Some(home.key.clone());
        Self {
            tabs: vec![home],
            active_key,
            revision: 0,
        }
    }

    /// Append a closable tab for `path` unless one already exists.
    ///
    /// Returns true if a tab was created.
    pub fn open(&mut self, path: &str, label: &str) -> bool {
        if self.contains(path) {
            log::debug!("Tab for {} already open, not duplicating", path);
            return false;
        }
        self.tabs.push(Tab::new(path, label));
        self.touch();
        log::info!(
            "Opened tab {} '{}' (total: {})",
            path,
            label,
            self.tabs.len()
        );
        true
    }

    /// Remove a closable tab.
    ///
    /// No-op for the permanent tab and for unknown keys. Leaves the active key
    /// untouched even when it pointed at the removed tab.
    pub fn close(&mut self, key: &str) -> bool {
        let Some(idx) = self.tabs.iter().position(|t| t.key == key) else {
            log::debug!("Ignoring close of unknown tab {}", key);
            return false;
        };
        if self.tabs[idx].is_permanent {
            log::debug!("Ignoring close of permanent tab {}", key);
            return false;
        }

        self.tabs.remove(idx);
        self.touch();
        log::info!(
            "Closed tab {} (index {}, remaining: {})",
            key,
            idx,
            self.tabs.len()
        );
        true
    }

    /// Change the label of the tab at `path` if it differs.
    pub fn relabel(&mut self, path: &str, label: &str) -> bool {
        match self.tabs.iter_mut().find(|t| t.path == path) {
            Some(tab) if tab.label != label => {
                log::debug!("Relabel {}: '{}' -> '{}'", path, tab.label, label);
                tab.label = label.to_string();
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Swap the tab at `old_path` for `new` in place.
    ///
    /// The tab keeps its slot and is demoted to non-permanent. The permanent
    /// tab itself is never replaced. If another tab already sits at the new
    /// path it is dropped so keys stay unique. The active key follows the
    /// replaced tab.
    pub fn replace(&mut self, old_path: &str, new: &TabDescriptor) -> bool {
        let Some(idx) = self.tabs.iter().position(|t| t.path == old_path) else {
            log::debug!("Ignoring replace of unknown tab {}", old_path);
            return false;
        };
        if self.tabs[idx].is_permanent {
            log::warn!("Refusing to replace permanent tab {}", old_path);
            return false;
        }

        if new.path != old_path
            && let Some(dup) = self.tabs.iter().position(|t| t.path == new.path)
        {
            if self.tabs[dup].is_permanent {
                log::warn!(
                    "Refusing to replace {} with the permanent tab's path {}",
                    old_path,
                    new.path
                );
                return false;
            }
            log::debug!("Dropping existing tab {} superseded by replace", new.path);
            self.tabs.remove(dup);
        }

        let idx = self
            .tabs
            .iter()
            .position(|t| t.path == old_path)
            .unwrap_or(idx);
        let tab = &mut self.tabs[idx];
        tab.key = new.path.clone();
        tab.path = new.path.clone();
        tab.label = new.label.clone();
        tab.is_permanent = false;

        if self.active_key.as_deref() == Some(old_path) {
            self.active_key = Some(new.path.clone());
        }
        self.touch();
        log::info!("Replaced tab {} with {} '{}'", old_path, new.path, new.label);
        true
    }

    /// Drop every closable tab and make the permanent tab active.
    ///
    /// Returns true if anything changed.
    pub fn reset(&mut self) -> bool {
        let before = self.tabs.len();
        self.tabs.retain(|t| t.is_permanent);
        let removed = before != self.tabs.len();
        if removed {
            self.touch();
            log::info!("Reset tabs: dropped {} tab(s)", before - self.tabs.len());
        }
        let home_key = self.permanent().key.clone();
        let switched = self.active_key.as_deref() != Some(home_key.as_str());
        self.active_key = Some(home_key);
        removed || switched
    }

    /// Make the tab with `key` active. No-op for unknown keys.
    pub fn set_active(&mut self, key: &str) -> bool {
        if self.active_key.as_deref() == Some(key) || !self.contains(key) {
            return false;
        }
        self.active_key = Some(key.to_string());
        log::debug!("Switched to tab {}", key);
        true
    }

    /// If the active key names no open tab, make the last tab active.
    ///
    /// Returns the newly active tab when a reassignment happened.
    pub fn reassign_dangling_active(&mut self) -> Option<&Tab> {
        if self.active_tab().is_some() {
            return None;
        }
        let last = self.tabs.last()?;
        log::debug!(
            "Active tab {:?} is gone, falling back to {}",
            self.active_key,
            last.key
        );
        self.active_key = Some(last.key.clone());
        self.tabs.last()
    }

    /// Whether a tab with this key (path) is open
    pub fn contains(&self, key: &str) -> bool {
        self.tabs.iter().any(|t| t.key == key)
    }

    /// Get a tab by key
    pub fn get(&self, key: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.key == key)
    }

    /// Get the active tab, if the active key refers to an open tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_key.as_deref().and_then(|key| self.get(key))
    }

    /// Get the active tab key, which may transiently be dangling
    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    /// The permanent home tab
    pub fn permanent(&self) -> &Tab {
        // `new` creates it and nothing removes or demotes it
        &self.tabs[0]
    }

    /// All tabs as a slice, in creation order
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Paths of every open tab
    pub fn open_paths(&self) -> HashSet<&str> {
        self.tabs.iter().map(|t| t.path.as_str()).collect()
    }

    /// Get the number of tabs
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Change counter for the tab list
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    #[cfg(test)]
    pub(crate) fn force_active(&mut self, key: Option<&str>) {
        self.active_key = key.map(str::to_string);
    }
}
