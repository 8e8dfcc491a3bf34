//! Evaluation engine seams
//!
//! The accessibility engine and the EARL report generator are external
//! collaborators. The run only needs the lifecycle calls, one evaluation per
//! rule and one report per evaluation.

mod http;
mod simulated;

pub use http::HttpEvaluationEngine;
pub use simulated::{EngineCall, SimulatedEngine, SimulatedReportGenerator};

use crate::error::EngineResult;
use crate::job::EvaluationJob;
use crate::report::{ReportFragment, ReportOptions};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Engine output for one job, passed to the report generator untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFindings(Value);

impl RawFindings {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Accessibility evaluation engine
#[async_trait]
pub trait EvaluationEngine: Send + Sync {
    /// Open the engine session (browser, render contexts, ...)
    async fn start(&self, launch_options: &Value) -> EngineResult<()>;

    /// Evaluate the job's URLs against its rule filter
    async fn evaluate(&self, job: &EvaluationJob) -> EngineResult<RawFindings>;

    /// Close the engine session
    async fn stop(&self) -> EngineResult<()>;
}

/// EARL report generator
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Convert raw findings into a rule-scoped report fragment
    async fn generate_report(
        &self,
        findings: &RawFindings,
        options: &ReportOptions,
    ) -> EngineResult<ReportFragment>;
}
