//! Multi-document workspace manager.
//!
//! Keeps a set of closable tabs (one per URL path) in sync with a router and
//! an authentication session, and retains each tab's rendered view while it
//! is hidden.
//!
//! The entry point is [`Workspace`], constructed with a [`RouterAdapter`] and
//! a [`SessionSignal`]. Everything runs on the caller's thread.

pub mod cli;
pub mod close_queue;
pub mod config {
    //! Configuration re-exports from the `worktabs-config` sub-crate.
    pub use worktabs_config::*;
}
pub mod debug;
pub mod error;
pub mod events;
pub mod reconciler;
pub mod render_cache;
pub mod router;
pub mod scenario;
pub mod session;
pub mod tab;
pub mod workspace;

pub use events::{SubscriptionId, WorkspaceEvent};
pub use router::{MemoryRouter, NavigateOptions, NavigationPayload, RouterAdapter};
pub use session::{SessionCell, SessionSignal, SessionState};
pub use tab::{Tab, TabDescriptor, TabKey};
pub use workspace::{Frame, Pane, ReconcileReport, TabRequest, Workspace};
