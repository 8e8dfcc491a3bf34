//! `rules` - list the rules of the catalog

use crate::error::CliResult;
use act_report_core::grouping::{distinct_rule_ids, urls_for_rule};
use act_report_core::ReportConfig;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Local test-case catalog instead of the published one
    #[arg(long)]
    pub catalog_path: Option<PathBuf>,
}

/// Print each rule with its number of test cases, in discovery order
pub async fn execute(args: RulesArgs, mut config: ReportConfig) -> CliResult<()> {
    if let Some(path) = args.catalog_path {
        config.catalog.path = Some(path);
    }

    let catalog = config.catalog.source()?.load().await?;
    for rule_id in distinct_rule_ids(&catalog) {
        println!("{}\t{}", rule_id, urls_for_rule(&rule_id, &catalog).len());
    }
    Ok(())
}
