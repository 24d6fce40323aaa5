//! Scenario replay through the CLI entry points.

use std::fs;
use tempfile::TempDir;
use worktabs::cli::{self, Commands};
use worktabs::config::Config;
use worktabs::scenario::Scenario;

const DRAFT_INVOICE: &str = r#"
start_path: /customers/42
role: admin
steps:
  - relabel: { path: /customers/42, label: Acme Corp }
  - open:
      path: /invoices/new
      label: New invoice
      payload: { customer: 42 }
  - replace: { old_path: /invoices/new, path: /invoices/123, label: "Invoice #123" }
  - request_close: /customers/42
  - idle
  - session: none
  - navigate: /login
  - session: established
"#;

fn write_scenario(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("scenario.yaml");
    fs::write(&path, contents).expect("write scenario");
    path
}

#[test]
fn draft_invoice_replay() {
    let scenario = Scenario::from_yaml(DRAFT_INVOICE).expect("parse");
    let snapshots = scenario.replay(&Config::default());
    assert_eq!(snapshots.len(), 8);

    let opened = &snapshots[1];
    assert_eq!(opened.router_path, "/invoices/new");
    assert_eq!(opened.payload, Some(serde_json::json!({"customer": 42})));

    let saved = &snapshots[2];
    assert_eq!(saved.router_path, "/invoices/123");
    assert_eq!(saved.tabs[2].label, "Invoice #123");
    assert_eq!(saved.cached_views, 2, "draft view migrated, not rebuilt");

    let pending = &snapshots[3];
    assert_eq!(pending.tabs.len(), 3);
    let idle = &snapshots[4];
    assert_eq!(idle.tabs.len(), 2);
    assert_eq!(idle.active.as_deref(), Some("/invoices/123"));

    let signed_out = &snapshots[5];
    assert_eq!(signed_out.tabs.len(), 1);
    assert_eq!(signed_out.cached_views, 0);

    let signed_in = &snapshots[7];
    assert_eq!(signed_in.router_path, "/");
    assert_eq!(signed_in.tabs.len(), 1);
    assert_eq!(signed_in.active.as_deref(), Some("/"));
    assert_eq!(signed_in.corrective_navigations, 1);
}

#[test]
fn replay_command_prints_one_line_per_step() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, DRAFT_INVOICE);

    let mut out = Vec::new();
    cli::run(
        Commands::Replay {
            scenario: path,
            json: false,
        },
        &Config::default(),
        &mut out,
    )
    .expect("replay succeeds");

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("[1] relabel /customers/42 'Acme Corp'"));
    assert!(lines[0].contains("tabs=[[Dashboard], Acme Corp*]"));
    assert!(lines[1].contains("payload={\"customer\":42}"));
    assert!(lines[7].contains("corrected=1"));
}

#[test]
fn replay_command_emits_json() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, DRAFT_INVOICE);

    let mut out = Vec::new();
    cli::run(
        Commands::Replay {
            scenario: path,
            json: true,
        },
        &Config::default(),
        &mut out,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    let steps = value.as_array().expect("array of snapshots");
    assert_eq!(steps.len(), 8);
    assert_eq!(steps[0]["tabs"][0]["is_permanent"], true);
    assert_eq!(steps[0]["active"], "/customers/42");
}

#[test]
fn missing_scenario_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");
    let err = cli::run(
        Commands::Replay {
            scenario: missing,
            json: false,
        },
        &Config::default(),
        &mut Vec::<u8>::new(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("nope.yaml"));
}

#[test]
fn custom_config_changes_home_and_policy() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.yaml");
    fs::write(
        &config_path,
        "home_path: /home\nhome_label: Start\nalways_tabbed_roles: [dispatcher]\n",
    )
    .unwrap();
    let config = cli::load_config(Some(&config_path)).expect("config loads");

    let scenario = Scenario::from_yaml(
        "start_path: /home\nrole: dispatcher\nsteps:\n  - navigate: /jobs/5\n",
    )
    .unwrap();
    let snapshots = scenario.replay(&config);
    assert_eq!(snapshots[0].tabs[0].label, "Start");
    assert_eq!(snapshots[0].tabs[0].key, "/home");
    assert_eq!(snapshots[0].active.as_deref(), Some("/jobs/5"));
}
