//! Migration of every source user holding a common role.

use crate::migrate::Migrator;
use crate::output::{error, info};
use crate::report::{MigrationReport, UserReport};
use crate::{CliError, CliResult};

/// Migrates every source user holding `role`, one user at a time.
///
/// Fails only when the enumeration fails or is empty. Per-user failures,
/// including aborted migrations, are recorded in the report and the batch
/// moves on to the next id.
pub async fn migrate_all(migrator: &Migrator, role: &str) -> CliResult<MigrationReport> {
    let user_ids = migrator.source().get_users_with_role(role).await?;
    if user_ids.is_empty() {
        return Err(CliError::NoUsers {
            role: role.to_string(),
        });
    }

    info(&format!(
        "Found {} user(s) with role '{}'",
        user_ids.len(),
        role
    ));

    let mut report = MigrationReport::default();
    for user_id in user_ids {
        let entry = match migrator.migrate_user(&user_id).await {
            Ok(outcome) => {
                if !outcome.is_completed() {
                    error(&format!("Migration failed for {user_id} ({outcome})"));
                }
                UserReport::finished(user_id, outcome)
            }
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "migration aborted");
                error(&format!("Migration failed for {user_id}: {err}"));
                UserReport::aborted(user_id, &err)
            }
        };
        report.push(entry);
    }

    Ok(report)
}
