//! Run controller
//!
//! Sequences one run: load the catalog, start the engine, evaluate every rule
//! one after the other, hand implemented reports to the output strategy, and
//! stop the engine. Rules never overlap: a rule's evaluation returns before
//! the next rule's job is built.

use crate::catalog::{RuleId, TestCaseCatalog, TestCaseSource};
use crate::engine::{EvaluationEngine, ReportGenerator};
use crate::error::{RunError, RunResult};
use crate::grouping::{distinct_rule_ids, select_rules, urls_for_rule};
use crate::job::{EvaluationJobBuilder, JobStyle};
use crate::output::OutputStrategy;
use crate::report::{is_implemented, ReportOptions};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Position of a run in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    CatalogLoaded,
    EngineStarted,
    JobBuilt,
    Evaluated,
    Filtered,
    Aggregated,
    Skipped,
    EngineStopped,
    Done,
    Aborted,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rules iterated, after selection
    pub rules_total: usize,
    /// Rules whose reports were handed to the output, in run order
    pub implemented: Vec<RuleId>,
    /// Rules without any assertion
    pub skipped: Vec<RuleId>,
    /// Artifacts written by the output strategy
    pub artifacts: Vec<PathBuf>,
}

/// Drives one report generation run
pub struct RunController {
    source: Box<dyn TestCaseSource>,
    engine: Arc<dyn EvaluationEngine>,
    generator: Arc<dyn ReportGenerator>,
    output: Box<dyn OutputStrategy>,
    job_builder: EvaluationJobBuilder,
    launch_options: Value,
    selection: Vec<RuleId>,
    state: RunState,
    history: Vec<RunState>,
}

impl RunController {
    pub fn new(
        source: Box<dyn TestCaseSource>,
        engine: Arc<dyn EvaluationEngine>,
        generator: Arc<dyn ReportGenerator>,
        output: Box<dyn OutputStrategy>,
    ) -> Self {
        Self {
            source,
            engine,
            generator,
            output,
            job_builder: EvaluationJobBuilder::default(),
            launch_options: Value::Object(Default::default()),
            selection: Vec::new(),
            state: RunState::Idle,
            history: Vec::new(),
        }
    }

    pub fn with_job_style(mut self, style: JobStyle) -> Self {
        self.job_builder = EvaluationJobBuilder::new(style);
        self
    }

    /// Options passed to the engine's `start`
    pub fn with_launch_options(mut self, launch_options: Value) -> Self {
        self.launch_options = launch_options;
        self
    }

    /// Only evaluate these rules; empty means every rule in the catalog
    pub fn with_rule_selection(mut self, rules: Vec<RuleId>) -> Self {
        self.selection = rules;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Every state entered so far, oldest first
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Run the whole pipeline.
    ///
    /// Any failure aborts the run. Once the engine is started, an abort still
    /// attempts to stop it before the error is returned.
    pub async fn run(&mut self) -> RunResult<RunSummary> {
        info!("Remember to update the evaluation engine to the latest version!");

        let catalog = match self.source.load().await {
            Ok(catalog) => catalog,
            Err(e) => return Err(self.abort(e.into())),
        };
        info!(
            source = %self.source.location(),
            test_cases = catalog.len(),
            "Test cases loaded"
        );
        self.transition(RunState::CatalogLoaded);

        let rule_ids = self.rules_to_run(&catalog);

        if let Err(e) = self.engine.start(&self.launch_options).await {
            return Err(self.abort(e.into()));
        }
        self.transition(RunState::EngineStarted);

        let summary = match self.run_rules(&catalog, rule_ids).await {
            Ok(summary) => summary,
            Err(e) => {
                if let Err(stop_error) = self.engine.stop().await {
                    warn!(error = %stop_error, "Engine did not stop cleanly after abort");
                }
                return Err(self.abort(e));
            }
        };

        if let Err(e) = self.engine.stop().await {
            return Err(self.abort(e.into()));
        }
        self.transition(RunState::EngineStopped);
        self.transition(RunState::Done);

        Ok(summary)
    }

    fn rules_to_run(&self, catalog: &TestCaseCatalog) -> Vec<RuleId> {
        let rule_ids = distinct_rule_ids(catalog);
        if self.selection.is_empty() {
            return rule_ids;
        }

        let (selected, missing) = select_rules(rule_ids, &self.selection);
        for rule_id in missing {
            warn!(rule = %rule_id, "Selected rule has no test cases in the catalog");
        }
        selected
    }

    async fn run_rules(
        &mut self,
        catalog: &TestCaseCatalog,
        rule_ids: Vec<RuleId>,
    ) -> RunResult<RunSummary> {
        let total = rule_ids.len();
        let mut summary = RunSummary {
            rules_total: total,
            ..RunSummary::default()
        };

        for (index, rule_id) in rule_ids.into_iter().enumerate() {
            info!(
                "Running tests for rule {} ( {} / {} )",
                rule_id,
                index + 1,
                total
            );

            let urls = urls_for_rule(&rule_id, catalog);
            let job = self.job_builder.build(&rule_id, urls);
            debug!(
                rule = %rule_id,
                urls = job.urls.len(),
                parallelism = ?job.parallelism(),
                "Evaluation job built"
            );
            self.transition(RunState::JobBuilt);

            let findings = self.engine.evaluate(&job).await?;
            self.transition(RunState::Evaluated);

            let options = ReportOptions::for_rule(&rule_id);
            let fragment = self.generator.generate_report(&findings, &options).await?;

            let implemented = is_implemented(&fragment);
            self.transition(RunState::Filtered);

            if implemented {
                debug!(
                    rule = %rule_id,
                    assertions = fragment.document().assertion_count(),
                    "Rule implemented"
                );
                self.output.on_rule_result(&rule_id, fragment).await?;
                self.transition(RunState::Aggregated);
                summary.implemented.push(rule_id);
            } else {
                info!("Rule {} is not implemented", rule_id);
                self.transition(RunState::Skipped);
                summary.skipped.push(rule_id);
            }
        }

        summary.artifacts = self.output.finish().await?;
        for artifact in &summary.artifacts {
            info!(path = %artifact.display(), "Report written");
        }

        Ok(summary)
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "Run state");
        self.state = next;
        self.history.push(next);
    }

    fn abort(&mut self, error: RunError) -> RunError {
        self.transition(RunState::Aborted);
        error
    }
}
