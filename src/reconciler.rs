//! URL↔tab reconciliation.
//!
//! Two reactions keep the router and the tab registry consistent:
//!
//! - **URL drives tabs** fires when anything it observes changes: the router
//!   path, the session state or epoch, the role, or a navigation issued by
//!   the workspace (even one to the path already shown). It resets the
//!   registry on login/logout and otherwise switches to (or, under the
//!   always-tabbed policy, creates) the tab for the path.
//! - **Tabs drive URL** fires when the registry's tab list changes. If the
//!   active tab was closed it falls back to the last open tab and asks the
//!   router to show it.
//!
//! Each reaction only runs on its own trigger and every navigation it
//! requests targets an already-open tab's path. Such a path is a fixed point
//! of the URL reaction, so the loop settles after at most one corrective
//! navigation.
//!
//! The reconciler never touches the router itself: it returns the navigation
//! it wants and the workspace issues it.

use crate::config::Config;
use crate::session::SessionState;
use crate::tab::{TabRegistry, default_label};

/// What the reconciler sees of the outside world on one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Normalized router path
    pub path: String,
    pub session: SessionState,
    pub role: Option<String>,
    /// Sign-in epoch reported by the session
    pub epoch: u64,
    /// Count of navigations the workspace has issued or re-selected
    pub navigation: u64,
}

/// Result of running one reaction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EffectOutcome {
    /// The reaction ran (its trigger fired and the session was resolved)
    pub ran: bool,
    /// The registry was reset to the home tab by a session transition
    pub reset: bool,
    /// Path to show with history replacement, if a correction is needed
    pub navigate_to: Option<String>,
}

/// Trigger bookkeeping for both reactions.
#[derive(Debug, Default)]
pub struct Reconciler {
    /// Observation last seen by the URL reaction
    observed: Option<Observation>,
    /// Last session state other than `Unknown`; `None` until one resolves
    last_resolved: Option<SessionState>,
    /// Epoch of the last established session handled
    established_epoch: Option<u64>,
    /// Registry revision last seen by the tabs reaction
    seen_revision: Option<u64>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the URL reaction's trigger fired.
    pub fn url_trigger_pending(&self, obs: &Observation) -> bool {
        self.observed.as_ref() != Some(obs)
    }

    /// An established session counts as a fresh login after a resolved
    /// sign-out, or when its epoch differs from the last established one.
    fn is_fresh_login(&self, obs: &Observation) -> bool {
        self.last_resolved == Some(SessionState::SignedOut)
            || self.established_epoch.is_some_and(|epoch| epoch != obs.epoch)
    }

    /// Whether the tabs reaction's trigger (tab list change) fired.
    pub fn tabs_trigger_pending(&self, registry: &TabRegistry) -> bool {
        self.seen_revision != Some(registry.revision())
    }

    /// URL drives tabs.
    pub fn url_drives_tabs(
        &mut self,
        registry: &mut TabRegistry,
        obs: &Observation,
        config: &Config,
    ) -> EffectOutcome {
        if !self.url_trigger_pending(obs) {
            return EffectOutcome::default();
        }
        self.observed = Some(obs.clone());

        let previous = self.last_resolved;
        match obs.session {
            SessionState::Unknown => {
                log::debug!("Session not resolved yet, deferring reconciliation");
                EffectOutcome::default()
            }
            SessionState::Established if self.is_fresh_login(obs) => {
                self.last_resolved = Some(SessionState::Established);
                self.established_epoch = Some(obs.epoch);
                log::info!("Fresh login: resetting workspace to the home tab");
                registry.reset();
                let home = registry.permanent().path.clone();
                let navigate_to = (obs.path != home).then_some(home);
                EffectOutcome {
                    ran: true,
                    reset: true,
                    navigate_to,
                }
            }
            SessionState::SignedOut => {
                self.last_resolved = Some(SessionState::SignedOut);
                let reset = registry.reset();
                if reset {
                    log::info!("No session: workspace reset to the home tab");
                }
                EffectOutcome {
                    ran: true,
                    reset: reset || previous != Some(SessionState::SignedOut),
                    navigate_to: None,
                }
            }
            SessionState::Established => {
                self.last_resolved = Some(SessionState::Established);
                self.established_epoch = Some(obs.epoch);
                Self::follow_path(registry, obs, config);
                EffectOutcome {
                    ran: true,
                    ..EffectOutcome::default()
                }
            }
        }
    }

    /// Tabs drive URL.
    pub fn tabs_drive_url(
        &mut self,
        registry: &mut TabRegistry,
        obs: &Observation,
    ) -> EffectOutcome {
        if !self.tabs_trigger_pending(registry) || obs.session == SessionState::Unknown {
            return EffectOutcome::default();
        }
        self.seen_revision = Some(registry.revision());

        let navigate_to = registry
            .reassign_dangling_active()
            .filter(|tab| tab.path != obs.path)
            .map(|tab| tab.path.clone());
        if let Some(path) = &navigate_to {
            log::debug!("Active tab closed, correcting router to {}", path);
        }
        EffectOutcome {
            ran: true,
            reset: false,
            navigate_to,
        }
    }

    /// Ordinary authenticated navigation under the role's tabbing policy.
    fn follow_path(registry: &mut TabRegistry, obs: &Observation, config: &Config) {
        if config.is_excluded_path(&obs.path) {
            log::debug!("{} is excluded from tabbing", obs.path);
            return;
        }

        let policy = config.policy_for_role(obs.role.as_deref());
        if !registry.contains(&obs.path) {
            if !policy.synthesizes_tabs() {
                log::debug!("{} has no tab and {:?} does not create one", obs.path, policy);
                return;
            }
            let label = default_label(&obs.path).unwrap_or_else(|| config.home_label.clone());
            registry.open(&obs.path, &label);
        }
        registry.set_active(&obs.path);
    }
}
