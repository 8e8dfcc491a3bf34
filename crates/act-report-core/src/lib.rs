//! # act-report-core
//!
//! Generates ACT rules implementation reports: which rules of the public ACT
//! test-case corpus an accessibility engine actually implements, recorded as
//! EARL JSON-LD.
//!
//! ## Pipeline
//!
//! - [`TestCaseCatalog`]: the published `{ruleId, url}` test cases
//! - [`grouping`]: distinct rules in discovery order, URLs per rule
//! - [`EvaluationJobBuilder`]: one rule-scoped engine job per rule
//! - [`EvaluationEngine`] / [`ReportGenerator`]: the external engine seams
//! - [`is_implemented`]: a rule counts when it produced any assertion
//! - [`ReportAggregator`]: merges rule reports into one document
//! - [`ReportWriter`] / [`OutputStrategy`]: per-rule or dated combined artifacts
//! - [`RunController`]: sequences the run between engine start and stop

pub mod catalog;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod job;
pub mod output;
pub mod report;
pub mod writer;

pub use catalog::{CatalogClient, CatalogFile, RuleId, TestCase, TestCaseCatalog, TestCaseSource};
pub use config::ReportConfig;
pub use controller::{RunController, RunState, RunSummary};
pub use engine::{
    EngineCall, EvaluationEngine, HttpEvaluationEngine, RawFindings, ReportGenerator,
    SimulatedEngine, SimulatedReportGenerator,
};
pub use error::{CatalogError, EngineError, RunError, RunResult, WriteError};
pub use job::{EvaluationJob, EvaluationJobBuilder, JobStyle};
pub use output::{AggregatedOutput, OutputMode, OutputStrategy, PerRuleOutput};
pub use report::{
    is_implemented, GraphEntry, ReportAggregator, ReportDocument, ReportFragment, ReportOptions,
};
pub use writer::ReportWriter;
