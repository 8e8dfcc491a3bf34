//! Run configuration
//!
//! Layered with the `config` crate: built-in defaults, an optional file, then
//! `ACT_REPORT_*` environment variables (`__` separates nested keys, e.g.
//! `ACT_REPORT_OUTPUT__MODE=per_rule`).

use crate::catalog::{CatalogClient, CatalogFile, TestCaseSource};
use crate::error::CatalogResult;
use crate::job::JobStyle;
use crate::output::{output_for, OutputMode, OutputStrategy};
use crate::writer::{ReportWriter, DEFAULT_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use ::config::ConfigError;

/// Published ACT rules test-case catalog
pub const DEFAULT_CATALOG_URL: &str =
    "https://www.w3.org/WAI/content-assets/wcag-act-rules/testcases.json";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where test cases come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog URL
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Local catalog file, used instead of the URL when set
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Fetch timeout in seconds
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            path: None,
            timeout_secs: default_catalog_timeout(),
        }
    }
}

impl CatalogConfig {
    /// Catalog source for this configuration
    pub fn source(&self) -> CatalogResult<Box<dyn TestCaseSource>> {
        match &self.path {
            Some(path) => Ok(Box::new(CatalogFile::new(path))),
            None => Ok(Box::new(CatalogClient::new(
                self.url.clone(),
                Duration::from_secs(self.timeout_secs),
            )?)),
        }
    }
}

/// Evaluation engine connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Evaluation service endpoint
    #[serde(default = "default_engine_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds; one evaluation covers every URL of a rule
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,

    /// Job configuration shape
    #[serde(default)]
    pub job_style: JobStyle,

    /// JSON object passed to the engine when the session starts. Held as text
    /// because configuration keys are case-folded while these are not.
    #[serde(default = "default_launch_options")]
    pub launch_options: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_engine_endpoint(),
            timeout_secs: default_engine_timeout(),
            job_style: JobStyle::default(),
            launch_options: default_launch_options(),
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Launch options as a JSON object
    pub fn parsed_launch_options(&self) -> Result<serde_json::Value, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(&self.launch_options)
            .map_err(|e| ConfigError::Message(format!("engine.launch_options: {}", e)))?;
        if !value.is_object() {
            return Err(ConfigError::Message(
                "engine.launch_options must be a JSON object".to_string(),
            ));
        }
        Ok(value)
    }
}

/// Artifact output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,

    /// Directory artifacts are written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Artifact file name prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            directory: default_output_directory(),
            prefix: default_prefix(),
        }
    }
}

impl OutputConfig {
    /// Output strategy for this configuration
    pub fn strategy(&self) -> Box<dyn OutputStrategy> {
        output_for(
            self.mode,
            ReportWriter::new(self.directory.clone()),
            self.prefix.clone(),
        )
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_catalog_timeout() -> u64 {
    30
}

fn default_engine_endpoint() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_engine_timeout() -> u64 {
    600
}

fn default_launch_options() -> String {
    "{}".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ReportConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&ReportConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ACT_REPORT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.engine.parsed_launch_options()?;
        Ok(config)
    }
}
