//! # st-migrate
//!
//! Command-line entry point for migrating users between tenants.

#![forbid(unsafe_code)]

use clap::Parser;
use st_migrate::{
    cli::Cli,
    commands::run,
    output::{banner, error, success},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mode = match cli.command.mode() {
        Ok(mode) => mode,
        Err(e) => {
            error(&e.to_string());
            std::process::exit(1);
        }
    };

    banner("Migration started");

    let code = match run(&cli, mode).await {
        Ok(report) => {
            let migrated = report.completed();
            if migrated > 0 {
                success(&format!("Users migrated: {migrated}"));
            }
            0
        }
        Err(e) => {
            error(&e.to_string());
            1
        }
    };

    banner("Migration run finished");
    std::process::exit(code);
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "st_migrate=debug,st_admin=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
