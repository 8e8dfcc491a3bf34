//! Error types for the report pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the test-case catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog could not be fetched
    #[error("Cannot read test cases from {url}: {source}")]
    Fetch {
        /// Catalog location
        url: String,
        /// Transport failure
        #[source]
        source: reqwest::Error,
    },

    /// The catalog endpoint answered with a non-success status
    #[error("Cannot read test cases from {url}: HTTP {status}")]
    Status {
        /// Catalog location
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The catalog document does not hold a test-case collection
    #[error("Malformed test-case catalog: {0}")]
    Format(String),

    /// A local catalog file could not be read
    #[error("Cannot read test cases from {path}: {source}")]
    Io {
        /// Catalog file
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },
}

/// Errors reported by the evaluation engine or the report generator
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine session could not be started
    #[error("Engine failed to start: {0}")]
    Start(String),

    /// Evaluation of a rule failed
    #[error("Evaluation failed for rule {rule_id}: {message}")]
    Evaluate {
        /// Rule being evaluated
        rule_id: String,
        /// Engine message
        message: String,
    },

    /// Engine session could not be stopped
    #[error("Engine failed to stop: {0}")]
    Stop(String),

    /// Report generation failed for a rule
    #[error("Report generation failed for rule {rule_id}: {message}")]
    Report {
        /// Rule the report was requested for
        rule_id: String,
        /// Generator message
        message: String,
    },

    /// Transport failure talking to a remote engine
    #[error("Engine transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Generated report does not have the expected envelope
    #[error("Malformed report: {0}")]
    MalformedReport(String),
}

/// Errors raised while persisting an artifact
#[derive(Debug, Error)]
pub enum WriteError {
    /// Report could not be serialized
    #[error("Cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Artifact could not be written
    #[error("Cannot write file {path}: {source}")]
    Io {
        /// Target artifact
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    /// Catalog load failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Engine or report generator failure
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Artifact write failure
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type for artifact writes
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for a whole run
pub type RunResult<T> = Result<T, RunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_url_and_code() {
        let e = CatalogError::Status {
            url: "https://example.org/testcases.json".into(),
            status: 503,
        };
        let msg = e.to_string();
        assert!(msg.contains("testcases.json"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn run_error_is_transparent() {
        let e: RunError = EngineError::Evaluate {
            rule_id: "b20e66".into(),
            message: "browser crashed".into(),
        }
        .into();
        assert_eq!(
            e.to_string(),
            "Evaluation failed for rule b20e66: browser crashed"
        );
    }

    #[test]
    fn write_error_display() {
        let e = WriteError::Io {
            path: PathBuf::from("/readonly/qualweb-a.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(format!("{}", e).contains("/readonly/qualweb-a.json"));
    }
}
