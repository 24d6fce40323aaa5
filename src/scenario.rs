//! Scripted replay of router, session and user events against a workspace.
//!
//! A scenario is a YAML file:
//!
//! ```yaml
//! start_path: /
//! session: established
//! role: admin
//! steps:
//!   - navigate: /customers/42
//!   - open: { path: /invoices/new, label: New invoice }
//!   - replace: { old_path: /invoices/new, path: /invoices/123, label: "Invoice #123" }
//!   - request_close: /customers/42
//!   - idle
//!   - session: none
//! ```

use crate::config::Config;
use crate::error::ScenarioError;
use crate::router::{MemoryRouter, NavigationPayload, RouterAdapter};
use crate::session::{SessionCell, SessionState};
use crate::tab::{Tab, TabDescriptor};
use crate::workspace::{TabRequest, Workspace};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_start_path() -> String {
    "/".to_string()
}

fn default_session() -> SessionState {
    SessionState::Established
}

/// A replayable sequence of events.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Path the router shows before the first step
    #[serde(default = "default_start_path")]
    pub start_path: String,
    /// Session state before the first step
    #[serde(default = "default_session")]
    pub session: SessionState,
    /// Role of the signed-in user
    #[serde(default)]
    pub role: Option<String>,
    pub steps: Vec<Step>,
}

/// One event in a scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// The user reaches a path directly (link, address bar, reload)
    Navigate(String),
    /// Browser back button
    Back,
    /// Explicit open from a screen
    Open {
        path: String,
        label: String,
        #[serde(default)]
        payload: Option<NavigationPayload>,
    },
    /// Immediate close
    Close(String),
    /// Close button press, applied on the next idle tick
    RequestClose(String),
    /// Idle tick
    Idle,
    /// Async label update
    Relabel { path: String, label: String },
    /// Draft entity saved under its permanent path
    Replace {
        old_path: String,
        path: String,
        label: String,
    },
    /// Session provider reports a new state
    Session(SessionState),
    /// Signed-in user's role changes
    Role(Option<String>),
}

impl Step {
    /// Short human-readable form
    pub fn describe(&self) -> String {
        match self {
            Step::Navigate(path) => format!("navigate {path}"),
            Step::Back => "back".to_string(),
            Step::Open { path, label, .. } => format!("open {path} '{label}'"),
            Step::Close(key) => format!("close {key}"),
            Step::RequestClose(key) => format!("request_close {key}"),
            Step::Idle => "idle".to_string(),
            Step::Relabel { path, label } => format!("relabel {path} '{label}'"),
            Step::Replace { old_path, path, .. } => format!("replace {old_path} -> {path}"),
            Step::Session(state) => format!("session {state:?}"),
            Step::Role(role) => format!("role {}", role.as_deref().unwrap_or("-")),
        }
    }
}

/// Workspace state after a step.
#[derive(Debug, Clone, Serialize)]
pub struct StepSnapshot {
    pub step: String,
    pub router_path: String,
    pub active: Option<String>,
    pub tabs: Vec<Tab>,
    pub cached_views: usize,
    pub corrective_navigations: usize,
    /// Payload handed to the screen shown after the step
    pub payload: Option<NavigationPayload>,
}

impl Scenario {
    pub fn from_yaml(contents: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Run every step against a fresh workspace with in-memory adapters.
    ///
    /// The active tab is rendered after each step so the cached view count
    /// reflects what a real frame would retain.
    pub fn replay(&self, config: &Config) -> Vec<StepSnapshot> {
        let router = MemoryRouter::new(&self.start_path);
        let session = SessionCell::new(self.session, self.role.as_deref());
        let mut workspace: Workspace<_, _, String> =
            Workspace::new(config.clone(), router.clone(), session.clone());

        let mut snapshots = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            log::debug!("Replaying step: {}", step.describe());
            let corrective_navigations = match step {
                Step::Navigate(path) => {
                    router.visit(path);
                    workspace.tick().corrective_navigations
                }
                Step::Back => {
                    router.back();
                    workspace.tick().corrective_navigations
                }
                Step::Open {
                    path,
                    label,
                    payload,
                } => {
                    let mut request = TabRequest::new(path, label);
                    request.payload = payload.clone();
                    workspace.open(request);
                    workspace.last_report().corrective_navigations
                }
                Step::Close(key) => {
                    workspace.close(key);
                    workspace.last_report().corrective_navigations
                }
                Step::RequestClose(key) => {
                    workspace.request_close(key);
                    0
                }
                Step::Idle => workspace.tick().corrective_navigations,
                Step::Relabel { path, label } => {
                    workspace.relabel(path, label);
                    workspace.last_report().corrective_navigations
                }
                Step::Replace {
                    old_path,
                    path,
                    label,
                } => {
                    workspace.replace(old_path, TabDescriptor::new(path, label));
                    workspace.last_report().corrective_navigations
                }
                Step::Session(state) => {
                    session.set_state(*state);
                    workspace.tick().corrective_navigations
                }
                Step::Role(role) => {
                    session.set_role(role.as_deref());
                    workspace.tick().corrective_navigations
                }
            };

            workspace.render(|tab| format!("view:{}", tab.path));
            snapshots.push(StepSnapshot {
                step: step.describe(),
                router_path: router.current_path(),
                active: workspace.active_tab_key().map(str::to_string),
                tabs: workspace.tabs().to_vec(),
                cached_views: workspace.cached_views(),
                corrective_navigations,
                payload: workspace.take_navigation_payload(),
            });
        }
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_step_shapes() {
        let scenario = Scenario::from_yaml(
            r#"
role: admin
steps:
  - navigate: /customers/42
  - back
  - open: { path: /quotes/new, label: New quote, payload: { customer: 42 } }
  - close: /quotes/new
  - request_close: /customers/42
  - idle
  - relabel: { path: /customers/42, label: Acme }
  - replace: { old_path: /quotes/new, path: /quotes/9, label: "Quote #9" }
  - session: none
  - session: unknown
  - role: technician
"#,
        )
        .expect("scenario parses");
        assert_eq!(scenario.start_path, "/");
        assert_eq!(scenario.session, SessionState::Established);
        assert_eq!(scenario.steps.len(), 11);
        assert!(matches!(scenario.steps[8], Step::Session(SessionState::SignedOut)));
    }

    #[test]
    fn unknown_step_is_a_parse_error() {
        let err = Scenario::from_yaml("steps:\n  - teleport: /x\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn replay_reports_state_after_each_step() {
        let scenario = Scenario::from_yaml(
            r#"
role: admin
steps:
  - navigate: /customers/42
  - request_close: /customers/42
  - idle
"#,
        )
        .unwrap();
        let snapshots = scenario.replay(&Config::default());

        assert_eq!(snapshots[0].active.as_deref(), Some("/customers/42"));
        assert_eq!(snapshots[0].tabs.len(), 2);
        assert_eq!(snapshots[1].tabs.len(), 2, "close waits for the idle tick");
        assert_eq!(snapshots[2].tabs.len(), 1);
        assert_eq!(snapshots[2].router_path, "/");
        assert_eq!(snapshots[2].corrective_navigations, 1);
        assert_eq!(snapshots[2].cached_views, 1);
    }
}
