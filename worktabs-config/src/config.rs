//! The `Config` struct, its YAML persistence and path helpers.

use crate::defaults;
use crate::error::ConfigError;
use crate::policy::TabbingPolicy;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace manager configuration, stored as `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the permanent (home/dashboard) tab
    #[serde(default = "defaults::home_path")]
    pub home_path: String,

    /// Label shown on the permanent tab
    #[serde(default = "defaults::home_label")]
    pub home_label: String,

    /// Roles using the always-tabbed navigation model; every other role
    /// (and a missing role) is explicit-open-only
    #[serde(default = "defaults::always_tabbed_roles")]
    pub always_tabbed_roles: Vec<String>,

    /// Paths that never become tabs. A path is excluded when it equals an
    /// entry or lies below it (`/auth/callback/x` under `/auth/callback`).
    #[serde(default = "defaults::excluded_paths")]
    pub excluded_paths: Vec<String>,

    /// Debug log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_path: defaults::home_path(),
            home_label: defaults::home_label(),
            always_tabbed_roles: defaults::always_tabbed_roles(),
            excluded_paths: defaults::excluded_paths(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating a default
    /// file if none exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save_to(&config_path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file.
    ///
    /// Writes to a temp file first and renames it over the target.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Get the configuration file path (XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("worktabs")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("worktabs")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.home_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "home_path must be absolute, got {:?}",
                self.home_path
            )));
        }
        if self.home_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "home_label must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self.excluded_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::Validation(format!(
                "excluded_paths entries must be absolute, got {:?}",
                bad
            )));
        }
        if self.is_excluded_path(&self.home_path) {
            return Err(ConfigError::Validation(format!(
                "home_path {:?} is listed in excluded_paths",
                self.home_path
            )));
        }
        Ok(())
    }

    /// Whether `path` is one of the unauthenticated/recovery routes.
    pub fn is_excluded_path(&self, path: &str) -> bool {
        self.excluded_paths.iter().any(|excluded| {
            let excluded = excluded.trim_end_matches('/');
            if excluded.is_empty() {
                // "/" would exclude everything
                return false;
            }
            path == excluded
                || path
                    .strip_prefix(excluded)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Resolve the tabbing policy for a signed-in user's role.
    pub fn policy_for_role(&self, role: Option<&str>) -> TabbingPolicy {
        match role {
            Some(role) if self.always_tabbed_roles.iter().any(|r| r == role) => {
                TabbingPolicy::AlwaysTabbed
            }
            _ => TabbingPolicy::ExplicitOpenOnly,
        }
    }
}
