//! Tab types and path helpers.
//!
//! A tab is a closable reference to one open path within the workspace. Its
//! key is its normalized path, so there is at most one tab per path.

mod registry;

pub use registry::TabRegistry;

use serde::Serialize;

/// Unique identifier for a tab; always equal to the tab's path.
pub type TabKey = String;

/// One entry on the tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    /// Stable unique identifier (the path)
    pub key: TabKey,
    /// URL path this tab represents
    pub path: String,
    /// Human-readable title; may change once an entity's name is fetched
    pub label: String,
    /// The home tab: cannot be closed and always exists
    pub is_permanent: bool,
}

impl Tab {
    /// Create a closable tab for `path`. The path must already be normalized.
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            key: path.clone(),
            path,
            label: label.into(),
            is_permanent: false,
        }
    }

    /// Create the permanent home tab.
    pub(crate) fn permanent(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            is_permanent: true,
            ..Self::new(path, label)
        }
    }
}

/// Path and label of a tab, as passed to `replace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    pub path: String,
    pub label: String,
}

impl TabDescriptor {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// Normalize a router path into a tab key.
///
/// Strips the query string and fragment, collapses repeated slashes and drops
/// trailing slashes. The root stays `/`; an empty path becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let segments: Vec<&str> = path[..end].split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Default tab label for a path: its last segment.
///
/// Returns `None` for the root path, which has no segment to show.
pub fn default_label(path: &str) -> Option<String> {
    normalize_path(path)
        .rsplit('/')
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_query_fragment_and_slashes() {
        assert_eq!(normalize_path("/customers/42/"), "/customers/42");
        assert_eq!(normalize_path("/customers//42?tab=notes"), "/customers/42");
        assert_eq!(normalize_path("/invoices#top"), "/invoices");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("?q=1"), "/");
    }

    #[test]
    fn default_label_is_last_segment() {
        assert_eq!(default_label("/customers/42"), Some("42".to_string()));
        assert_eq!(default_label("/invoices/"), Some("invoices".to_string()));
        assert_eq!(default_label("/"), None);
    }

    #[test]
    fn new_tab_key_equals_path() {
        let tab = Tab::new("/quotes/7", "Quote 7");
        assert_eq!(tab.key, tab.path);
        assert!(!tab.is_permanent);
        assert!(Tab::permanent("/", "Dashboard").is_permanent);
    }
}
