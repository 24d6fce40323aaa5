//! Log bridge for worktabs.
//!
//! Routes every `log::info!()` etc. to `worktabs_debug.log` in the system temp
//! directory, mirrored to stderr when `RUST_LOG` is set. Keeping log output
//! in a file keeps the replay output on stdout clean.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config's
//! `log_level` (applied after the config is loaded).

use crate::config::LogLevel;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
    /// Level came from the CLI or RUST_LOG; config must not override it
    level_locked: bool,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("worktabs_debug.log")
}

/// Level named by `RUST_LOG`, accepting both `debug` and `worktabs=debug`.
fn env_level() -> Option<LogLevel> {
    let value = std::env::var("RUST_LOG").ok()?;
    value
        .split(',')
        .filter_map(|directive| directive.rsplit('=').next())
        .find_map(LogLevel::from_name)
}

/// Install the bridge as the global logger.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let env = env_level();
    let level = cli_level.or(env).unwrap_or(LogLevel::Off);

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(None),
        mirror_stderr: env.is_some(),
        level_locked: cli_level.is_some() || env.is_some(),
    });
    if log::set_logger(bridge).is_err() {
        return;
    }
    set_level(level);
}

/// Apply the config's log level unless the CLI or environment chose one.
pub fn apply_config_level(level: LogLevel) {
    match BRIDGE.get() {
        Some(bridge) if !bridge.level_locked => set_level(level),
        _ => {}
    }
}

fn set_level(level: LogLevel) {
    log::set_max_level(level.to_level_filter());
    let Some(bridge) = BRIDGE.get() else {
        return;
    };
    let mut file = bridge.file.lock();
    if level != LogLevel::Off && file.is_none() {
        // Silently run without a file if it can't be opened
        *file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        if let Some(f) = file.as_mut() {
            let _ = writeln!(
                f,
                "worktabs debug session started at {} (level={})",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                level.display_name()
            );
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.6f"),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "{line}");
        }
        if self.mirror_stderr {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}
