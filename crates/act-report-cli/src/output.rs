//! Console output helpers

use act_report_core::RunSummary;
use colored::*;

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print the outcome of a completed run
pub fn print_summary(summary: &RunSummary) {
    print_success(&format!(
        "{} of {} rules implemented",
        summary.implemented.len(),
        summary.rules_total
    ));

    if !summary.skipped.is_empty() {
        let skipped: Vec<&str> = summary.skipped.iter().map(|id| id.as_str()).collect();
        print_warning(&format!("Not implemented: {}", skipped.join(", ")));
    }

    if summary.artifacts.is_empty() {
        println!("{}", "No report written".dimmed());
    }
    for artifact in &summary.artifacts {
        println!("  {}", artifact.display());
    }
}
