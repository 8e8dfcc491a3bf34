//! `run` - evaluate every rule and write the report

use crate::error::CliResult;
use crate::output;
use act_report_core::{HttpEvaluationEngine, OutputMode, ReportConfig, RuleId, RunController};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

/// Artifact layout
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// One date-stamped report for the whole run
    Aggregated,
    /// One report per implemented rule
    PerRule,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Aggregated => OutputMode::Aggregated,
            ModeArg::PerRule => OutputMode::PerRule,
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Artifact layout
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Directory reports are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Local test-case catalog instead of the published one
    #[arg(long)]
    pub catalog_path: Option<PathBuf>,

    /// Only evaluate this rule (repeatable)
    #[arg(short, long = "rule", value_name = "RULE_ID")]
    pub rules: Vec<String>,
}

impl RunArgs {
    fn apply(&self, config: &mut ReportConfig) {
        if let Some(mode) = self.mode {
            config.output.mode = mode.into();
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if let Some(path) = &self.catalog_path {
            config.catalog.path = Some(path.clone());
        }
    }
}

/// Execute a full run
pub async fn execute(args: RunArgs, mut config: ReportConfig) -> CliResult<()> {
    args.apply(&mut config);

    let source = config.catalog.source()?;
    let engine = Arc::new(HttpEvaluationEngine::new(
        &config.engine.endpoint,
        config.engine.timeout(),
    )?);

    let mut controller = RunController::new(
        source,
        engine.clone(),
        engine,
        config.output.strategy(),
    )
    .with_job_style(config.engine.job_style)
    .with_launch_options(config.engine.parsed_launch_options()?)
    .with_rule_selection(args.rules.into_iter().map(RuleId::from).collect());

    let summary = controller.run().await?;
    output::print_summary(&summary);
    Ok(())
}
