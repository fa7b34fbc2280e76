//! Single-user migration.
//!
//! A user is read from the source tenant, re-created in the destination
//! tenant through a third-party sign-up, mapped back to its original id,
//! given its roles and metadata, and finally re-read to verify the copy.
//! Steps run strictly in order; nothing is retried.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use st_admin::dto::{Metadata, SignInUpRequest, UserRecord};
use st_admin::{AdminClient, ApiError, MappingStatus};

use crate::config::{DelayConfig, MigrateConfig};
use crate::env::Environments;
use crate::output::{detail, error, warning};
use crate::CliResult;

/// Terminal state of one user's migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationOutcome {
    /// Copied and verified.
    Completed,
    /// Profile, metadata or roles missing at the source; nothing was written.
    SkippedMissingSourceData,
    /// The destination user could not be mapped to the original id.
    FailedMapping,
    /// The destination did not show the copied data on re-read.
    FailedVerification,
}

impl MigrationOutcome {
    /// Whether this is [`MigrationOutcome::Completed`].
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }

    /// Stable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::SkippedMissingSourceData => "skipped-missing-source-data",
            Self::FailedMapping => "failed-mapping",
            Self::FailedVerification => "failed-verification",
        }
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile, metadata and roles of one user in one tenant.
#[derive(Debug, Clone)]
pub struct UserSnapshot {
    /// Profile, if the tenant knows the id.
    pub record: Option<UserRecord>,
    /// Metadata document (`{}` when none).
    pub metadata: Metadata,
    /// Role names.
    pub roles: Vec<String>,
}

impl UserSnapshot {
    /// Reads a snapshot from `client`.
    pub async fn read(client: &AdminClient, user_id: &str) -> CliResult<Self> {
        let record = client.get_user(user_id).await?;
        let metadata = client.get_user_metadata(user_id).await?;
        let roles = client.get_user_roles(user_id).await?;
        Ok(Self {
            record,
            metadata,
            roles,
        })
    }

    /// Whether the profile is present and metadata and roles are non-empty.
    pub fn is_complete(&self) -> bool {
        self.record.is_some() && !self.metadata.is_empty() && !self.roles.is_empty()
    }

    /// Splits a complete snapshot into its parts.
    pub fn into_complete(self) -> Option<(UserRecord, Metadata, Vec<String>)> {
        match self.record {
            Some(record) if !self.metadata.is_empty() && !self.roles.is_empty() => {
                Some((record, self.metadata, self.roles))
            }
            _ => None,
        }
    }
}

/// Compares two role lists as sets.
pub fn same_role_set(a: &[String], b: &[String]) -> bool {
    a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
}

/// Copies users from the source tenant to the destination tenant.
#[derive(Debug, Clone)]
pub struct Migrator {
    source: AdminClient,
    destination: AdminClient,
    delays: DelayConfig,
}

impl Migrator {
    /// Creates a migrator over two clients.
    pub fn new(source: AdminClient, destination: AdminClient, delays: DelayConfig) -> Self {
        Self {
            source,
            destination,
            delays,
        }
    }

    /// Creates a migrator from resolved credentials and tuning.
    pub fn from_environments(environments: &Environments, config: &MigrateConfig) -> CliResult<Self> {
        let timeout = config.request_timeout();
        let source = AdminClient::with_timeout(&environments.source, timeout)?;
        let destination = AdminClient::with_timeout(&environments.destination, timeout)?;
        Ok(Self::new(source, destination, config.delays))
    }

    /// Gets the source tenant client.
    pub fn source(&self) -> &AdminClient {
        &self.source
    }

    /// Gets the destination tenant client.
    pub fn destination(&self) -> &AdminClient {
        &self.destination
    }

    /// Migrates one user.
    ///
    /// Returns the terminal state; an `Err` means a call failed and the
    /// migration was abandoned mid-way.
    pub async fn migrate_user(&self, user_id: &str) -> CliResult<MigrationOutcome> {
        tracing::info!(user_id, "migrating user");

        let source = UserSnapshot::read(&self.source, user_id).await?;
        let Some((record, metadata, roles)) = source.into_complete() else {
            error(&format!(
                "User info, metadata or roles not found for user with id: {user_id}. Skipping..."
            ));
            return Ok(MigrationOutcome::SkippedMissingSourceData);
        };

        let Some(sign_up) = SignInUpRequest::from_record(&record) else {
            error(&format!(
                "User {user_id} has no third-party login or email to re-create it from. Skipping..."
            ));
            return Ok(MigrationOutcome::SkippedMissingSourceData);
        };

        let created = self.destination.sign_in_up(&sign_up).await?;
        if !created.created_new_user {
            detail(&format!("User already exists for {}", sign_up.email.id));
        }
        let generated_id = created.user.id;
        tokio::time::sleep(self.delays.after_write()).await;

        match self.destination.map_user_id(&generated_id, user_id).await {
            Ok(MappingStatus::Mapped) => {}
            Ok(MappingStatus::AlreadyMapped) => {
                detail(&format!("Mapping already exists for {user_id}"));
            }
            Err(err) => {
                tracing::warn!(user_id, generated_id = %generated_id, error = %err, "mapping failed");
                error(&format!(
                    "Failed to map user with id: {user_id} to new id: {generated_id}. Migration failed."
                ));
                return Ok(MigrationOutcome::FailedMapping);
            }
        }
        tokio::time::sleep(self.delays.after_write()).await;

        // From here on the original id is the canonical reference.
        let assigned = self
            .destination
            .assign_roles(user_id, &roles, self.delays.per_role())
            .await
            .map_err(|err| {
                if let ApiError::RoleAssignment { applied, .. } = &err {
                    warning(&format!("Roles added before error: {}", applied.join(", ")));
                }
                err
            })?;
        for assignment in assigned.iter().filter(|a| a.already_had) {
            detail(&format!(
                "User \"{user_id}\" already had role \"{}\".",
                assignment.role
            ));
        }
        tokio::time::sleep(self.delays.after_write()).await;

        let write = self
            .destination
            .update_metadata(user_id, &metadata, self.delays.before_metadata_write())
            .await?;
        if write.overwrote_existing {
            detail(&format!("User \"{user_id}\" already had metadata. Overwritten."));
        }

        tokio::time::sleep(self.delays.before_verify()).await;
        let migrated = UserSnapshot::read(&self.destination, user_id).await?;
        if !migrated.is_complete() {
            error(&format!(
                "User info, metadata or roles not found for user with id: {user_id} (unmapped id: {generated_id}). Migration failed."
            ));
            return Ok(MigrationOutcome::FailedVerification);
        }
        if !same_role_set(&roles, &migrated.roles) {
            warning(&format!(
                "Roles of {user_id} differ after migration: source {:?}, destination {:?}",
                roles, migrated.roles
            ));
        }

        detail(&format!("Migration for {user_id} completed"));
        Ok(MigrationOutcome::Completed)
    }
}
