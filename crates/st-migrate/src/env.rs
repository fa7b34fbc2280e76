//! Source and destination credential resolution.
//!
//! Each tenant's credentials come from its own dotenv file. The files are
//! parsed independently and never written into the process environment, so
//! a value missing from one file cannot be filled in by the other.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use st_admin::Credentials;

use crate::{CliError, CliResult};

/// Variable holding the tenant's API key.
pub const API_KEY_VAR: &str = "AUTH_SUPERTOKENS_API_KEY";

/// Variable holding the tenant's connection URI.
pub const CONNECTION_URI_VAR: &str = "AUTH_SUPERTOKENS_CONNECTION_URI";

/// Default dotenv file of the source (dev) tenant.
pub const DEFAULT_DEV_ENV_FILE: &str = ".env";

/// Default dotenv file of the destination (prod) tenant.
pub const DEFAULT_PROD_ENV_FILE: &str = ".env.production";

/// A tenant of the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tenant {
    /// Development tenant, the migration source.
    Dev,
    /// Production tenant, the migration destination.
    Prod,
}

impl Tenant {
    /// Prefix the tenant's connection URI must start with.
    pub const fn expected_prefix(self) -> &'static str {
        match self {
            Self::Dev => "https://st-dev",
            Self::Prod => "https://st-prod",
        }
    }

    const fn short_name(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "development"),
            Self::Prod => write!(f, "production"),
        }
    }
}

/// Raw, unvalidated values for one tenant.
#[derive(Debug, Clone, Default)]
pub struct TenantValues {
    /// API key, if set.
    pub api_key: Option<String>,
    /// Connection URI, if set.
    pub connection_uri: Option<String>,
}

impl TenantValues {
    /// Creates values from optional strings.
    pub fn new(api_key: Option<&str>, connection_uri: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            connection_uri: connection_uri.map(str::to_string),
        }
    }

    /// Reads the values from a dotenv file. A missing file provides nothing.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "env file not found");
            return Ok(Self::default());
        }

        let read_error =
            |e: dotenvy::Error| CliError::Config(format!("failed to read {}: {e}", path.display()));
        let mut vars = dotenvy::from_path_iter(path)
            .map_err(read_error)?
            .collect::<Result<HashMap<String, String>, _>>()
            .map_err(read_error)?;

        Ok(Self {
            api_key: vars.remove(API_KEY_VAR),
            connection_uri: vars.remove(CONNECTION_URI_VAR),
        })
    }
}

/// Validated credentials of both tenants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environments {
    /// Source (dev) tenant.
    pub source: Credentials,
    /// Destination (prod) tenant.
    pub destination: Credentials,
}

impl Environments {
    /// Loads and validates both tenants from their dotenv files.
    pub fn load(dev_file: &Path, prod_file: &Path) -> CliResult<Self> {
        let dev = TenantValues::from_file(dev_file)?;
        let prod = TenantValues::from_file(prod_file)?;
        Self::resolve(dev, prod)
    }

    /// Validates raw values.
    ///
    /// All four values must be present and non-blank; then the source URI
    /// must carry the dev prefix and the destination URI the prod prefix.
    pub fn resolve(dev: TenantValues, prod: TenantValues) -> CliResult<Self> {
        let mut missing = Vec::new();
        let dev_key = present(dev.api_key, API_KEY_VAR, Tenant::Dev, &mut missing);
        let dev_uri = present(dev.connection_uri, CONNECTION_URI_VAR, Tenant::Dev, &mut missing);
        let prod_key = present(prod.api_key, API_KEY_VAR, Tenant::Prod, &mut missing);
        let prod_uri = present(prod.connection_uri, CONNECTION_URI_VAR, Tenant::Prod, &mut missing);

        let (Some(dev_key), Some(dev_uri), Some(prod_key), Some(prod_uri)) =
            (dev_key, dev_uri, prod_key, prod_uri)
        else {
            return Err(CliError::MissingCredential(missing));
        };

        check_prefix(&dev_uri, Tenant::Dev)?;
        check_prefix(&prod_uri, Tenant::Prod)?;

        Ok(Self {
            source: Credentials::new(dev_uri, dev_key),
            destination: Credentials::new(prod_uri, prod_key),
        })
    }
}

fn present(
    value: Option<String>,
    name: &str,
    tenant: Tenant,
    missing: &mut Vec<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => {
            missing.push(format!("{name} ({})", tenant.short_name()));
            None
        }
    }
}

fn check_prefix(uri: &str, tenant: Tenant) -> CliResult<()> {
    if uri.starts_with(tenant.expected_prefix()) {
        Ok(())
    } else {
        Err(CliError::InvalidConnectionUri {
            tenant,
            expected_prefix: tenant.expected_prefix(),
        })
    }
}
