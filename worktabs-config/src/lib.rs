//! Configuration system for worktabs.
//!
//! This crate provides configuration loading, saving, validation and default
//! values for the workspace manager. It includes:
//!
//! - The `Config` struct and its YAML persistence
//! - Role-based tabbing policy resolution
//! - Log level selection shared with the binary's log bridge

pub mod config;
pub mod defaults;
pub mod error;
pub mod policy;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use policy::TabbingPolicy;
pub use types::LogLevel;
