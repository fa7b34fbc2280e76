//! CLI error types.

use st_admin::ApiError;
use thiserror::Error;

use crate::env::Tenant;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// One or more credential values are absent or empty.
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingCredential(Vec<String>),

    /// A connection URI does not look like the tenant it was loaded for.
    #[error("invalid connection URI for {tenant} environment; expected to start with {expected_prefix}")]
    InvalidConnectionUri {
        /// Tenant whose URI failed the check.
        tenant: Tenant,
        /// Prefix the URI must start with.
        expected_prefix: &'static str,
    },

    /// Invalid command-line usage.
    #[error("{0}")]
    Usage(String),

    /// The source tenant has no user holding the common role.
    #[error("no existing users found with role '{role}'")]
    NoUsers {
        /// Role used for enumeration.
        role: String,
    },

    /// Administration API error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Whether the error was raised before any network call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::MissingCredential(_) | Self::InvalidConnectionUri { .. }
        )
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
