//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;
use crate::env::{DEFAULT_DEV_ENV_FILE, DEFAULT_PROD_ENV_FILE};
use crate::{CliError, CliResult};

/// Copies SuperTokens users from the dev tenant to the prod tenant.
#[derive(Debug, Parser)]
#[command(name = "st-migrate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Dotenv file with the source (dev) tenant credentials.
    #[arg(long, env = "ST_MIGRATE_DEV_ENV", default_value = DEFAULT_DEV_ENV_FILE)]
    pub dev_env: PathBuf,

    /// Dotenv file with the destination (prod) tenant credentials.
    #[arg(long, env = "ST_MIGRATE_PROD_ENV", default_value = DEFAULT_PROD_ENV_FILE)]
    pub prod_env: PathBuf,

    /// Tuning configuration file (default: ~/.st-migrate/config.toml).
    #[arg(short, long, env = "ST_MIGRATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Migrate a single user.
    User {
        /// Source user id.
        user_id: Option<String>,
    },

    /// Migrate every user holding the common role.
    All {
        /// Common role used to enumerate users (overrides config).
        #[arg(long)]
        role: Option<String>,
    },
}

/// What a run migrates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One user by id.
    Single(String),
    /// Every user holding a role, or the configured default role.
    All(Option<String>),
}

impl Command {
    /// Resolves the run mode, rejecting a single-user run without an id.
    pub fn mode(&self) -> CliResult<Mode> {
        match self {
            Self::User { user_id: Some(id) } if !id.trim().is_empty() => Ok(Mode::Single(id.clone())),
            Self::User { .. } => Err(CliError::Usage("No userId provided as argument".to_string())),
            Self::All { role } => Ok(Mode::All(role.clone())),
        }
    }
}
