//! Session signal contract and a settable in-memory session.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Authentication state reported by the session provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Still being established; all reconciliation waits
    Unknown,
    /// Logged out or never logged in
    #[serde(rename = "none")]
    SignedOut,
    /// A user is signed in
    Established,
}

/// Observable authentication state consumed by the workspace.
pub trait SessionSignal {
    /// Current session state
    fn state(&self) -> SessionState;

    /// Role of the signed-in user, used to pick the tabbing policy
    fn role(&self) -> Option<String> {
        None
    }

    /// Identifies the current sign-in. Must change whenever the user signs
    /// out or a new sign-in starts, even if the workspace never observes the
    /// intermediate state.
    fn epoch(&self) -> u64 {
        0
    }
}

#[derive(Debug)]
struct SessionCellState {
    state: SessionState,
    role: Option<String>,
    epoch: u64,
}

/// Settable session for tests and scenario replay.
///
/// Clones share state, like `MemoryRouter`.
#[derive(Debug, Clone)]
pub struct SessionCell {
    inner: Arc<Mutex<SessionCellState>>,
}

impl SessionCell {
    pub fn new(state: SessionState, role: Option<&str>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionCellState {
                state,
                role: role.map(str::to_string),
                epoch: 0,
            })),
        }
    }

    /// A session already established for `role`
    pub fn established(role: &str) -> Self {
        Self::new(SessionState::Established, Some(role))
    }

    /// Report a new state. Entering `SignedOut` ends the current sign-in.
    pub fn set_state(&self, state: SessionState) {
        let mut inner = self.inner.lock();
        if state == SessionState::SignedOut && inner.state != SessionState::SignedOut {
            inner.epoch += 1;
        }
        inner.state = state;
    }

    pub fn set_role(&self, role: Option<&str>) {
        self.inner.lock().role = role.map(str::to_string);
    }

    /// Log in as `role`, starting a new sign-in
    pub fn sign_in(&self, role: &str) {
        let mut inner = self.inner.lock();
        inner.state = SessionState::Established;
        inner.role = Some(role.to_string());
        inner.epoch += 1;
    }

    /// Log out, clearing the role
    pub fn sign_out(&self) {
        let mut inner = self.inner.lock();
        if inner.state != SessionState::SignedOut {
            inner.epoch += 1;
        }
        inner.state = SessionState::SignedOut;
        inner.role = None;
    }
}

impl SessionSignal for SessionCell {
    fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    fn role(&self) -> Option<String> {
        self.inner.lock().role.clone()
    }

    fn epoch(&self) -> u64 {
        self.inner.lock().epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_out_and_in_changes_epoch() {
        let session = SessionCell::established("admin");
        let first = session.epoch();
        session.set_state(SessionState::SignedOut);
        session.set_state(SessionState::SignedOut);
        session.set_state(SessionState::Established);
        assert_eq!(session.epoch(), first + 1, "repeated sign-outs count once");
        session.sign_in("technician");
        assert_eq!(session.epoch(), first + 2);
        assert_eq!(session.role().as_deref(), Some("technician"));
    }

    #[test]
    fn resolving_unknown_keeps_epoch() {
        let session = SessionCell::new(SessionState::Unknown, Some("admin"));
        session.set_state(SessionState::Established);
        assert_eq!(session.epoch(), 0);
    }
}
