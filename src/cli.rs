//! Command-line interface for worktabs.
//!
//! The binary replays scripted scenarios against a workspace backed by the
//! in-memory router and session, and prints the effective configuration.

use crate::config::{Config, LogLevel};
use crate::scenario::{Scenario, StepSnapshot};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

/// worktabs - multi-document workspace manager
#[derive(Parser)]
#[command(name = "worktabs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/worktabs/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level for the debug log (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level, global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a scenario file and print the workspace after each step
    Replay {
        /// Scenario YAML file
        scenario: PathBuf,

        /// Print snapshots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as YAML
    ShowConfig,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = LogLevel::all().iter().map(|l| l.display_name()).collect();
        format!("unknown log level '{value}' (expected one of {})", names.join(", "))
    })
}

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

/// Execute a subcommand, writing its output to `out`.
pub fn run(command: Commands, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Replay { scenario, json } => {
            let scenario = Scenario::load(&scenario)
                .with_context(|| format!("Failed to load scenario {}", scenario.display()))?;
            log::info!("Replaying {} step(s)", scenario.steps.len());
            let snapshots = scenario.replay(config);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshots)?)?;
            } else {
                for (idx, snapshot) in snapshots.iter().enumerate() {
                    writeln!(out, "{}", format_snapshot(idx + 1, snapshot))?;
                }
            }
        }
        Commands::ShowConfig => {
            write!(out, "{}", serde_yaml_ng::to_string(config)?)?;
        }
    }
    Ok(())
}

/// One line per step: `[n] step -> path=... active=... tabs=[...]`.
///
/// The active tab is starred and the permanent tab is bracketed.
pub fn format_snapshot(index: usize, snapshot: &StepSnapshot) -> String {
    let tabs: Vec<String> = snapshot
        .tabs
        .iter()
        .map(|tab| {
            let mut label = if tab.is_permanent {
                format!("[{}]", tab.label)
            } else {
                tab.label.clone()
            };
            if snapshot.active.as_deref() == Some(tab.key.as_str()) {
                label.push('*');
            }
            label
        })
        .collect();

    let mut line = format!(
        "[{}] {} -> path={} active={} tabs=[{}] cached={}",
        index,
        snapshot.step,
        snapshot.router_path,
        snapshot.active.as_deref().unwrap_or("-"),
        tabs.join(", "),
        snapshot.cached_views
    );
    if snapshot.corrective_navigations > 0 {
        line.push_str(&format!(" corrected={}", snapshot.corrective_navigations));
    }
    if let Some(payload) = &snapshot.payload {
        line.push_str(&format!(" payload={payload}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_replay_with_global_flags() {
        let cli = Cli::try_parse_from([
            "worktabs",
            "replay",
            "demo.yaml",
            "--json",
            "--log-level",
            "DEBUG",
        ])
        .expect("valid arguments");
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(matches!(cli.command, Commands::Replay { json: true, .. }));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let result = Cli::try_parse_from(["worktabs", "show-config", "--log-level", "loud"]);
        assert!(result.is_err());
    }

    #[test]
    fn show_config_prints_yaml() {
        let mut out = Vec::new();
        run(Commands::ShowConfig, &Config::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("home_label: Dashboard"));
    }
}
