//! Tuning configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CliError, CliResult};

/// Tuning configuration, read from `~/.st-migrate/config.toml` when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrateConfig {
    /// Role used to enumerate all source users.
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Output format of the migration report.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Waits inserted after writes to the destination tenant.
    #[serde(default)]
    pub delays: DelayConfig,
}

fn default_role() -> String {
    st_admin::DEFAULT_COMMON_ROLE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            request_timeout_secs: default_request_timeout_secs(),
            output_format: OutputFormat::default(),
            delays: DelayConfig::default(),
        }
    }
}

impl MigrateConfig {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => Self::config_path()?,
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CliError::Config(format!("failed to parse config: {e}")))?;
        if config.request_timeout_secs == 0 {
            return Err(CliError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Gets the default configuration file path.
    pub fn config_path() -> CliResult<PathBuf> {
        let home = dirs_next::home_dir()
            .ok_or_else(|| CliError::Config("could not determine home directory".to_string()))?;
        Ok(home.join(".st-migrate").join("config.toml"))
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Fixed waits for the destination tenant's read-after-write window.
///
/// These are blunt: nothing confirms the write is visible once they elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    /// After sign-up, after mapping and after role assignment.
    pub after_write_ms: u64,
    /// After each successful role assignment.
    pub per_role_ms: u64,
    /// Between the metadata existence check and the overwrite.
    pub before_metadata_write_ms: u64,
    /// Before re-reading the migrated user.
    pub before_verify_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            after_write_ms: 10,
            per_role_ms: 10,
            before_metadata_write_ms: 10,
            before_verify_ms: 30,
        }
    }
}

impl DelayConfig {
    /// No waits at all.
    pub const fn none() -> Self {
        Self {
            after_write_ms: 0,
            per_role_ms: 0,
            before_metadata_write_ms: 0,
            before_verify_ms: 0,
        }
    }

    /// Wait after a state-mutating call.
    pub fn after_write(&self) -> Duration {
        Duration::from_millis(self.after_write_ms)
    }

    /// Wait after each role assignment.
    pub fn per_role(&self) -> Duration {
        Duration::from_millis(self.per_role_ms)
    }

    /// Wait before the metadata overwrite.
    pub fn before_metadata_write(&self) -> Duration {
        Duration::from_millis(self.before_metadata_write_ms)
    }

    /// Wait before verification reads.
    pub fn before_verify(&self) -> Duration {
        Duration::from_millis(self.before_verify_ms)
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// Banners only.
    Quiet,
}
