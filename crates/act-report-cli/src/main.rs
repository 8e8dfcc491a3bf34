//! act-report - ACT rules implementation report generator
//!
//! Drives an accessibility evaluation engine over the public ACT rules test
//! cases, one rule at a time, and writes EARL reports for the rules the engine
//! implements.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use act_report_core::config::LoggingConfig;
use act_report_core::ReportConfig;
use commands::{rules, run};
use error::CliResult;

/// act-report CLI application
#[derive(Parser)]
#[command(name = "act-report")]
#[command(about = "Generate ACT rules implementation reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ACT_REPORT_CONFIG")]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Evaluate the catalog rule by rule and write reports
    Run(run::RunArgs),

    /// List catalog rules with their test-case counts
    Rules(rules::RulesArgs),

    /// Show the resolved configuration
    Config,
}

fn init_tracing(logging: &LoggingConfig, verbose: bool, json: bool) {
    // --verbose overrides RUST_LOG, which overrides the configured level
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| logging.level.as_str().into())
    };

    if json || logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
    }
}

async fn execute(cli: Cli) -> CliResult<()> {
    let config = ReportConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging, cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Run(args) => run::execute(args, config).await,
        Commands::Rules(args) => rules::execute(args, config).await,
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
