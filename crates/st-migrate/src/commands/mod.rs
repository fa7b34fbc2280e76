//! Command implementations.

pub mod all;
pub mod user;

pub use all::run_all;
pub use user::run_user;

use crate::cli::{Cli, Mode};
use crate::config::MigrateConfig;
use crate::env::Environments;
use crate::migrate::Migrator;
use crate::output;
use crate::report::MigrationReport;

/// Resolves configuration, runs `mode` and prints the report.
///
/// Configuration problems are reported before any network call.
pub async fn run(cli: &Cli, mode: Mode) -> crate::CliResult<MigrationReport> {
    let config = MigrateConfig::load(cli.config.as_deref())?;
    let environments = Environments::load(&cli.dev_env, &cli.prod_env)?;
    let migrator = Migrator::from_environments(&environments, &config)?;

    let report = match mode {
        Mode::Single(user_id) => run_user(&migrator, &user_id).await?,
        Mode::All(role) => {
            let role = role.unwrap_or_else(|| config.default_role.clone());
            run_all(&migrator, &role).await?
        }
    };

    output::report(&report, cli.output.unwrap_or(config.output_format))?;
    Ok(report)
}
