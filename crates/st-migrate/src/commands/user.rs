//! Single-user migration command.

use crate::migrate::Migrator;
use crate::output::error;
use crate::report::{MigrationReport, UserReport};

/// Migrates one user.
///
/// An error aborting the migration propagates; a non-completed outcome is
/// reported but is not an error.
pub async fn run_user(migrator: &Migrator, user_id: &str) -> crate::CliResult<MigrationReport> {
    let outcome = migrator.migrate_user(user_id).await?;
    if !outcome.is_completed() {
        error(&format!("Migration failed for {user_id} ({outcome})"));
    }

    let mut report = MigrationReport::default();
    report.push(UserReport::finished(user_id, outcome));
    Ok(report)
}
