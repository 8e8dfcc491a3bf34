//! Output strategies: what happens to the report of an implemented rule

use crate::catalog::RuleId;
use crate::error::WriteResult;
use crate::report::{ReportAggregator, ReportFragment};
use crate::writer::{dated_file_name, rule_file_name, ReportWriter};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// How implemented rule reports become artifacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One date-stamped document for the whole run
    #[default]
    Aggregated,
    /// One document per implemented rule
    PerRule,
}

/// Receives the report of every implemented rule, in run order
#[async_trait]
pub trait OutputStrategy: Send {
    /// Handle the report of an implemented rule
    async fn on_rule_result(&mut self, rule_id: &RuleId, fragment: ReportFragment)
        -> WriteResult<()>;

    /// Called once after the last rule; returns every artifact written by the run
    async fn finish(&mut self) -> WriteResult<Vec<PathBuf>>;
}

/// Writes `<prefix>-<ruleId>.json` as soon as a rule is reported
pub struct PerRuleOutput {
    writer: ReportWriter,
    prefix: String,
    written: Vec<PathBuf>,
}

impl PerRuleOutput {
    pub fn new(writer: ReportWriter, prefix: impl Into<String>) -> Self {
        Self {
            writer,
            prefix: prefix.into(),
            written: Vec::new(),
        }
    }
}

#[async_trait]
impl OutputStrategy for PerRuleOutput {
    async fn on_rule_result(
        &mut self,
        rule_id: &RuleId,
        fragment: ReportFragment,
    ) -> WriteResult<()> {
        let file_name = rule_file_name(&self.prefix, rule_id);
        let path = self
            .writer
            .write(&file_name, &fragment.into_document())
            .await?;
        self.written.push(path);
        Ok(())
    }

    async fn finish(&mut self) -> WriteResult<Vec<PathBuf>> {
        Ok(std::mem::take(&mut self.written))
    }
}

/// Merges every report and writes `<prefix>-<YYYY-MM-DD>.json` at the end
pub struct AggregatedOutput {
    writer: ReportWriter,
    prefix: String,
    date: Option<NaiveDate>,
    aggregator: ReportAggregator,
}

impl AggregatedOutput {
    pub fn new(writer: ReportWriter, prefix: impl Into<String>) -> Self {
        Self {
            writer,
            prefix: prefix.into(),
            date: None,
            aggregator: ReportAggregator::new(),
        }
    }

    /// Stamp the artifact with `date` instead of the UTC date at finish time
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn aggregator(&self) -> &ReportAggregator {
        &self.aggregator
    }
}

#[async_trait]
impl OutputStrategy for AggregatedOutput {
    async fn on_rule_result(
        &mut self,
        rule_id: &RuleId,
        fragment: ReportFragment,
    ) -> WriteResult<()> {
        self.aggregator.merge(fragment);
        debug!(
            rule = %rule_id,
            graph_entries = self.aggregator.graph_len(),
            "Rule report merged"
        );
        Ok(())
    }

    async fn finish(&mut self) -> WriteResult<Vec<PathBuf>> {
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        let file_name = dated_file_name(&self.prefix, date);
        let report = std::mem::take(&mut self.aggregator).finish();
        let path = self.writer.write(&file_name, &report).await?;
        Ok(vec![path])
    }
}

/// Output strategy for `mode`
pub fn output_for(
    mode: OutputMode,
    writer: ReportWriter,
    prefix: impl Into<String>,
) -> Box<dyn OutputStrategy> {
    match mode {
        OutputMode::Aggregated => Box::new(AggregatedOutput::new(writer, prefix)),
        OutputMode::PerRule => Box::new(PerRuleOutput::new(writer, prefix)),
    }
}
