//! Role-based tabbing policy.

use serde::{Deserialize, Serialize};

/// How router navigation turns into tabs for the signed-in user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabbingPolicy {
    /// Every distinct (non-excluded) path the router shows becomes a tab.
    AlwaysTabbed,
    /// Tabs are only created by an explicit open; raw navigation only
    /// switches to an already-open tab.
    ExplicitOpenOnly,
}

impl TabbingPolicy {
    /// Whether router navigation may synthesize new tabs.
    pub fn synthesizes_tabs(self) -> bool {
        matches!(self, TabbingPolicy::AlwaysTabbed)
    }
}
