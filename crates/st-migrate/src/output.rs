//! Console output for the operator.

use colored::Colorize;
use tabled::{settings::Style, Table};

use crate::config::OutputFormat;
use crate::report::MigrationReport;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Prints a low-key informational notice.
pub fn detail(message: &str) {
    println!("{} {}", "·".dimmed(), message.dimmed());
}

/// Prints a run banner.
pub fn banner(message: &str) {
    println!("{}", format!("=== {message}").cyan().bold());
}

/// Prints the per-user results of a run.
///
/// `Quiet` prints nothing.
pub fn report(report: &MigrationReport, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table if report.users.is_empty() => info("No users attempted."),
        OutputFormat::Table => {
            let table = Table::new(&report.users).with(Style::rounded()).to_string();
            println!("{table}");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}
