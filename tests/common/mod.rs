//! Shared integration test helpers for worktabs.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` suppresses warnings when a file uses only some
//! helpers.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use worktabs::config::Config;
use worktabs::{MemoryRouter, SessionCell, Workspace, WorkspaceEvent};

/// Views are plain strings in tests; the counter in the name tells renders
/// apart.
pub type TestWorkspace = Workspace<MemoryRouter, SessionCell, String>;

/// A workspace plus handles onto its router and session.
pub struct TestContext {
    pub workspace: TestWorkspace,
    pub router: MemoryRouter,
    pub session: SessionCell,
}

impl TestContext {
    /// Signed in as `role`, router showing `start_path`.
    pub fn signed_in(role: &str, start_path: &str) -> Self {
        Self::with_session(SessionCell::established(role), start_path)
    }

    /// Admin role (always-tabbed under the default config)
    pub fn admin(start_path: &str) -> Self {
        Self::signed_in("admin", start_path)
    }

    /// Technician role (explicit-open-only under the default config)
    pub fn technician(start_path: &str) -> Self {
        Self::signed_in("technician", start_path)
    }

    pub fn with_session(session: SessionCell, start_path: &str) -> Self {
        let router = MemoryRouter::new(start_path);
        let workspace = Workspace::new(Config::default(), router.clone(), session.clone());
        Self {
            workspace,
            router,
            session,
        }
    }

    /// User reaches `path` directly, then the workspace reacts.
    pub fn visit(&mut self, path: &str) {
        self.router.visit(path);
        self.workspace.tick();
    }

    pub fn tab_keys(&self) -> Vec<String> {
        self.workspace.tabs().iter().map(|t| t.key.clone()).collect()
    }

    pub fn active(&self) -> Option<String> {
        self.workspace.active_tab_key().map(str::to_string)
    }

    /// Render the active tab, producing `view:<path>#<n>` on a cache miss.
    pub fn render(&mut self, counter: &Rc<RefCell<usize>>) {
        let counter = Rc::clone(counter);
        self.workspace.render(move |tab| {
            *counter.borrow_mut() += 1;
            format!("view:{}#{}", tab.path, counter.borrow())
        });
    }
}

/// Subscribe a recorder that collects every event.
pub fn record_events(workspace: &mut TestWorkspace) -> Rc<RefCell<Vec<WorkspaceEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    workspace.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

/// Exactly one permanent tab exists.
pub fn assert_single_permanent(workspace: &TestWorkspace) {
    let permanent = workspace.tabs().iter().filter(|t| t.is_permanent).count();
    assert_eq!(permanent, 1, "expected exactly one permanent tab");
}

/// The active key names an open tab.
pub fn assert_active_valid(workspace: &TestWorkspace) {
    let active = workspace.active_tab_key().expect("an active tab");
    assert!(
        workspace.tabs().iter().any(|t| t.key == active),
        "active key {active} must refer to an open tab"
    );
}
