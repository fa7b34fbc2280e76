//! Batch migration command.

use crate::batch::migrate_all;
use crate::migrate::Migrator;
use crate::output::info;
use crate::report::MigrationReport;

/// Migrates every source user holding `role`.
pub async fn run_all(migrator: &Migrator, role: &str) -> crate::CliResult<MigrationReport> {
    info(&format!(
        "Enumerating users with role '{}' at {}",
        role,
        migrator.source().base_url()
    ));
    let report = migrate_all(migrator, role).await?;
    info(&format!(
        "{} of {} user(s) fully migrated",
        report.completed(),
        report.attempted()
    ));
    Ok(report)
}
