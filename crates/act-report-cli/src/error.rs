//! CLI error types

use act_report_core::{CatalogError, EngineError, RunError};
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] act_report_core::config::ConfigError),

    /// Catalog could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Engine client could not be created
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Run aborted
    #[error("Run aborted: {0}")]
    Run(#[from] RunError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
