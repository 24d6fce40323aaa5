//! Errors for the fallible edges of the crate.
//!
//! The workspace itself cannot fail; only loading scenario files can.

use thiserror::Error;

/// Errors produced while loading a replay scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("I/O error reading scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error in scenario: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}
