//! In-process engine for tests and dry runs

use super::{EvaluationEngine, RawFindings, ReportGenerator};
use crate::catalog::RuleId;
use crate::error::{EngineError, EngineResult};
use crate::job::EvaluationJob;
use crate::report::{GraphEntry, ReportDocument, ReportFragment, ReportOptions};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Lifecycle and evaluation calls seen by a [`SimulatedEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Start,
    Evaluate(RuleId),
    Stop,
}

/// Simulated engine (no browser, no network).
///
/// Findings echo the job's rule and URLs so the simulated generator can build
/// one graph entry per evaluated URL.
#[derive(Default)]
pub struct SimulatedEngine {
    calls: Mutex<Vec<EngineCall>>,
    jobs: Mutex<Vec<EvaluationJob>>,
    fail_start: bool,
    fail_on: Option<RuleId>,
}

impl SimulatedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to start
    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Fail the evaluation of one rule
    pub fn failing_on(mut self, rule_id: impl Into<RuleId>) -> Self {
        self.fail_on = Some(rule_id.into());
        self
    }

    pub async fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().await.clone()
    }

    pub async fn jobs(&self) -> Vec<EvaluationJob> {
        self.jobs.lock().await.clone()
    }
}

#[async_trait]
impl EvaluationEngine for SimulatedEngine {
    async fn start(&self, _launch_options: &Value) -> EngineResult<()> {
        self.calls.lock().await.push(EngineCall::Start);
        if self.fail_start {
            return Err(EngineError::Start("simulated start failure".into()));
        }
        Ok(())
    }

    async fn evaluate(&self, job: &EvaluationJob) -> EngineResult<RawFindings> {
        self.calls
            .lock()
            .await
            .push(EngineCall::Evaluate(job.rule_id.clone()));
        self.jobs.lock().await.push(job.clone());

        if self.fail_on.as_ref() == Some(&job.rule_id) {
            return Err(EngineError::Evaluate {
                rule_id: job.rule_id.to_string(),
                message: "simulated evaluation failure".into(),
            });
        }

        Ok(RawFindings::new(json!({
            "rule": job.rule_id,
            "urls": job.urls,
        })))
    }

    async fn stop(&self) -> EngineResult<()> {
        self.calls.lock().await.push(EngineCall::Stop);
        Ok(())
    }
}

/// Simulated EARL generator with scripted assertion counts per rule.
///
/// Rules without a script produce one entry per evaluated URL, all without
/// assertions.
#[derive(Default)]
pub struct SimulatedReportGenerator {
    scripts: HashMap<RuleId, Vec<usize>>,
    requests: Mutex<Vec<ReportOptions>>,
    fail_on: Option<RuleId>,
}

impl SimulatedReportGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the graph of `rule_id`: one entry per count, with that many assertions
    pub fn with_rule(mut self, rule_id: impl Into<RuleId>, assertions: &[usize]) -> Self {
        self.scripts.insert(rule_id.into(), assertions.to_vec());
        self
    }

    /// Fail report generation for one rule
    pub fn failing_on(mut self, rule_id: impl Into<RuleId>) -> Self {
        self.fail_on = Some(rule_id.into());
        self
    }

    pub async fn requests(&self) -> Vec<ReportOptions> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ReportGenerator for SimulatedReportGenerator {
    async fn generate_report(
        &self,
        findings: &RawFindings,
        options: &ReportOptions,
    ) -> EngineResult<ReportFragment> {
        self.requests.lock().await.push(options.clone());
        let rule_id = &options.aggregated_name;

        if self.fail_on.as_ref() == Some(rule_id) {
            return Err(EngineError::Report {
                rule_id: rule_id.to_string(),
                message: "simulated report failure".into(),
            });
        }

        let urls: Vec<String> = findings
            .as_value()
            .get("urls")
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let counts = self
            .scripts
            .get(rule_id)
            .cloned()
            .unwrap_or_else(|| vec![0; urls.len()]);

        let graph = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let source = urls
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("{}#{}", rule_id, i));
                let assertions = (0..count)
                    .map(|n| {
                        json!({
                            "@type": "Assertion",
                            "test": { "title": rule_id, "index": n },
                            "result": { "outcome": "earl:passed" }
                        })
                    })
                    .collect();
                let mut entry = GraphEntry::with_assertions(assertions);
                entry.fields.insert("@type".into(), json!("TestSubject"));
                entry.fields.insert("source".into(), json!(source));
                entry
            })
            .collect();

        let mut envelope = Map::new();
        envelope.insert(
            "@context".into(),
            json!("https://act-rules.github.io/earl-context.json"),
        );
        envelope.insert(
            "assertor".into(),
            json!({ "@type": "Software", "title": "simulated" }),
        );

        Ok(ReportFragment::new(
            rule_id.as_str(),
            ReportDocument { envelope, graph },
        ))
    }
}
