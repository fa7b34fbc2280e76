//! # st-migrate
//!
//! Copies SuperTokens users from a development tenant to a production tenant.
//!
//! This crate provides:
//! - Credential resolution for both tenants with a guard against swapping them
//! - Single-user migration: read, sign up, map id, assign roles, write metadata, verify
//! - Batch migration of every user holding a common role
//! - Color-coded console output and a per-user report

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod migrate;
pub mod output;
pub mod report;

pub use cli::Cli;
pub use config::MigrateConfig;
pub use env::Environments;
pub use error::{CliError, CliResult};
pub use migrate::{MigrationOutcome, Migrator};
pub use report::MigrationReport;
