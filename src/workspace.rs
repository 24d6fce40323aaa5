//! The workspace service: tab registry, reconciler and render cache wired to
//! an injected router and session.
//!
//! Every public operation runs to completion synchronously: it mutates the
//! registry, reconciles against the router and session, prunes the render
//! cache and only then notifies listeners.

use crate::close_queue::CloseQueue;
use crate::config::Config;
use crate::events::{Listeners, SubscriptionId, WorkspaceEvent};
use crate::reconciler::{Observation, Reconciler};
use crate::render_cache::RenderCache;
use crate::router::{NavigateOptions, NavigationPayload, RouterAdapter};
use crate::session::{SessionSignal, SessionState};
use crate::tab::{Tab, TabDescriptor, TabRegistry, normalize_path};

/// Upper bound on reaction rounds per operation. Convergence needs at most
/// two rounds after a correction; hitting this is a bug and gets logged.
const MAX_RECONCILE_ROUNDS: usize = 4;

/// Arguments to `Workspace::open`.
#[derive(Debug, Clone, PartialEq)]
pub struct TabRequest {
    pub path: String,
    pub label: String,
    /// Forwarded to the router as the navigation payload
    pub payload: Option<NavigationPayload>,
}

impl TabRequest {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: NavigationPayload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// How the last operation's reconciliation went.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Reaction rounds run
    pub rounds: usize,
    /// Navigations issued by the reconciler to correct the router
    pub corrective_navigations: usize,
    /// Deferred closes applied from the close queue
    pub closed: usize,
}

/// One cached tab view in a frame.
#[derive(Debug)]
pub struct Pane<'a, V> {
    pub tab: &'a Tab,
    pub view: &'a V,
    /// Only the active pane is visible; the rest stay mounted but hidden
    pub visible: bool,
}

/// Everything the workspace frame should mount for one render.
#[derive(Debug)]
pub struct Frame<'a, V> {
    /// Cached views in tab order
    pub panes: Vec<Pane<'a, V>>,
    /// Router path that has no tab (unauthenticated routes, or raw
    /// navigation under explicit-open-only). The shell renders it uncached
    /// and no pane is visible.
    pub untracked_path: Option<String>,
}

impl<'a, V> Frame<'a, V> {
    /// The visible pane, if any
    pub fn visible(&self) -> Option<&Pane<'a, V>> {
        self.panes.iter().find(|p| p.visible)
    }
}

/// Multi-document workspace: open tabs kept in sync with a router and a
/// session, each tab's view retained while hidden.
pub struct Workspace<R, S, V> {
    config: Config,
    router: R,
    session: S,
    registry: TabRegistry,
    reconciler: Reconciler,
    cache: RenderCache<V>,
    /// Registry revision the cache was last pruned against
    cache_revision: Option<u64>,
    close_queue: CloseQueue,
    /// Bumped for every navigation the workspace issues or re-selects, so a
    /// navigation to the path already shown still reaches the URL reaction
    navigation: u64,
    listeners: Listeners,
    /// Events produced by the current operation, flushed when it ends
    pending_events: Vec<WorkspaceEvent>,
    last_report: ReconcileReport,
}

impl<R, S, V> Workspace<R, S, V>
where
    R: RouterAdapter,
    S: SessionSignal,
{
    /// Create a workspace and reconcile it with the router's current path.
    pub fn new(config: Config, router: R, session: S) -> Self {
        let home_path = normalize_path(&config.home_path);
        let registry = TabRegistry::new(&home_path, &config.home_label);
        let mut workspace = Self {
            config,
            router,
            session,
            registry,
            reconciler: Reconciler::new(),
            cache: RenderCache::new(),
            cache_revision: None,
            close_queue: CloseQueue::new(),
            navigation: 0,
            listeners: Listeners::default(),
            pending_events: Vec::new(),
            last_report: ReconcileReport::default(),
        };
        workspace.last_report = workspace.reconcile();
        workspace.pending_events.clear();
        log::info!(
            "Workspace ready (home: {}, active: {:?})",
            home_path,
            workspace.active_tab_key()
        );
        workspace
    }

    /// Open a tab for `request.path` (or reuse the existing one) and navigate
    /// to it, forwarding the payload.
    ///
    /// Returns true if a new tab was created.
    pub fn open(&mut self, request: TabRequest) -> bool {
        let before = self.snapshot();
        let path = normalize_path(&request.path);
        let created = if self.config.is_excluded_path(&path) {
            log::warn!("Not opening a tab for excluded path {}", path);
            false
        } else {
            self.registry.open(&path, &request.label)
        };
        self.navigate(
            &request.path,
            NavigateOptions::push().with_payload(request.payload),
        );
        self.finish(before);
        created
    }

    /// Close a tab immediately. No-op for the permanent tab and unknown keys.
    ///
    /// If the active tab is closed, the last remaining tab becomes active and
    /// the router is moved there with history replacement.
    pub fn close(&mut self, key: &str) -> bool {
        let before = self.snapshot();
        let closed = self.registry.close(&normalize_path(key));
        self.finish(before);
        closed
    }

    /// Queue a close to run on the next `tick`.
    ///
    /// Close buttons use this so the tab is not removed while its own
    /// press/release gesture is still being dispatched.
    pub fn request_close(&mut self, key: &str) -> bool {
        self.close_queue.enqueue(&normalize_path(key))
    }

    /// Update a tab's label if it changed. No-op for unknown paths.
    pub fn relabel(&mut self, path: &str, label: &str) -> bool {
        let before = self.snapshot();
        let changed = self.registry.relabel(&normalize_path(path), label);
        self.finish(before);
        changed
    }

    /// Turn the tab at `old_path` into `new`, keeping its slot and its cached
    /// view, and move the router there without adding a history entry.
    pub fn replace(&mut self, old_path: &str, new: TabDescriptor) -> bool {
        let before = self.snapshot();
        let old_path = normalize_path(old_path);
        let new = TabDescriptor::new(normalize_path(&new.path), new.label);
        let replaced = self.registry.replace(&old_path, &new);
        if replaced {
            self.cache.migrate(&old_path, &new.path);
            self.navigate(&new.path, NavigateOptions::replace());
        }
        self.finish(before);
        replaced
    }

    /// Switch to an open tab by navigating to its path.
    ///
    /// When the router already shows the path no history entry is added; the
    /// tab is re-selected from the displayed path instead.
    pub fn activate(&mut self, key: &str) -> bool {
        let before = self.snapshot();
        let path = match self.registry.get(&normalize_path(key)) {
            Some(tab) => tab.path.clone(),
            None => return false,
        };
        if normalize_path(&self.router.current_path()) == path {
            self.navigation += 1;
        } else {
            self.navigate(&path, NavigateOptions::push());
        }
        self.finish(before);
        true
    }

    /// Idle tick: apply deferred closes and pick up router/session changes.
    pub fn tick(&mut self) -> ReconcileReport {
        let before = self.snapshot();
        let mut closed = 0;
        for key in self.close_queue.drain() {
            if self.registry.close(&key) {
                closed += 1;
            }
        }
        self.finish(before);
        self.last_report.closed = closed;
        self.last_report
    }

    /// Open tabs in creation order
    pub fn tabs(&self) -> &[Tab] {
        self.registry.tabs()
    }

    /// Key of the active tab
    pub fn active_tab_key(&self) -> Option<&str> {
        self.registry.active_key()
    }

    /// The active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.registry.active_tab()
    }

    /// Hand the router's one-shot navigation payload to the active screen.
    pub fn take_navigation_payload(&self) -> Option<NavigationPayload> {
        self.router.take_navigation_payload()
    }

    /// Build the frame: make sure the active tab has a view, then list every
    /// cached view with only the active one visible.
    pub fn render(&mut self, render_fn: impl FnOnce(&Tab) -> V) -> Frame<'_, V> {
        let current = normalize_path(&self.router.current_path());
        let established = self.session.state() == SessionState::Established;
        let untracked_path = (!established || !self.registry.contains(&current)).then_some(current);

        if untracked_path.is_none()
            && let Some(tab) = self.registry.active_tab()
        {
            self.cache.ensure(&tab.path, || render_fn(tab));
        }

        let active = self.registry.active_key();
        let panes = self
            .registry
            .tabs()
            .iter()
            .filter_map(|tab| {
                self.cache.get(&tab.path).map(|view| Pane {
                    tab,
                    view,
                    visible: untracked_path.is_none() && active == Some(tab.key.as_str()),
                })
            })
            .collect();

        Frame {
            panes,
            untracked_path,
        }
    }

    /// Mutable access to a tab's retained view
    pub fn cached_view_mut(&mut self, path: &str) -> Option<&mut V> {
        self.cache.get_mut(&normalize_path(path))
    }

    /// Register a listener for tab list, active tab and navigation changes
    pub fn subscribe(&mut self, listener: impl FnMut(&WorkspaceEvent) + 'static) -> SubscriptionId {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Reconciliation summary of the most recent operation
    pub fn last_report(&self) -> ReconcileReport {
        self.last_report
    }

    /// Number of deferred closes waiting for the next tick
    pub fn pending_closes(&self) -> usize {
        self.close_queue.len()
    }

    /// Number of retained views
    pub fn cached_views(&self) -> usize {
        self.cache.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    fn observe(&self) -> Observation {
        Observation {
            path: normalize_path(&self.router.current_path()),
            session: self.session.state(),
            role: self.session.role(),
            epoch: self.session.epoch(),
            navigation: self.navigation,
        }
    }

    fn navigate(&mut self, path: &str, options: NavigateOptions) {
        let replace_history = options.replace_history;
        self.navigation += 1;
        self.router.navigate(path, options);
        self.pending_events.push(WorkspaceEvent::Navigated {
            path: path.to_string(),
            replace_history,
        });
    }

    /// Run both reactions until neither asks for a navigation.
    fn reconcile(&mut self) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        while report.rounds < MAX_RECONCILE_ROUNDS {
            report.rounds += 1;
            let obs = self.observe();

            let url = self
                .reconciler
                .url_drives_tabs(&mut self.registry, &obs, &self.config);
            if url.reset {
                // A new session must never see the previous session's views
                self.cache = RenderCache::new();
            }
            let correction = match url.navigate_to {
                Some(path) => Some(path),
                None => {
                    self.reconciler
                        .tabs_drive_url(&mut self.registry, &obs)
                        .navigate_to
                }
            };
            self.sync_cache();

            match correction {
                Some(path) => {
                    report.corrective_navigations += 1;
                    self.navigate(&path, NavigateOptions::replace());
                }
                None => return report,
            }
        }
        log::warn!(
            "Reconciliation did not settle after {} rounds",
            MAX_RECONCILE_ROUNDS
        );
        report
    }

    fn sync_cache(&mut self) {
        let revision = self.registry.revision();
        if self.cache_revision == Some(revision) {
            return;
        }
        self.cache.prune(&self.registry.open_paths());
        self.cache_revision = Some(revision);
    }

    fn snapshot(&self) -> (u64, Option<String>) {
        (
            self.registry.revision(),
            self.registry.active_key().map(str::to_string),
        )
    }

    /// Reconcile, then flush events produced by the operation.
    fn finish(&mut self, before: (u64, Option<String>)) {
        self.last_report = self.reconcile();

        let mut events = std::mem::take(&mut self.pending_events);
        let (revision, active) = self.snapshot();
        if revision != before.0 {
            events.push(WorkspaceEvent::TabsChanged(self.registry.tabs().to_vec()));
        }
        if active != before.1 {
            events.push(WorkspaceEvent::ActiveTabChanged(active));
        }
        if self.listeners.is_empty() {
            return;
        }
        for event in &events {
            self.listeners.notify(event);
        }
    }
}
