//! Per-user results of a migration run.

use serde::Serialize;
use tabled::Tabled;

use crate::migrate::MigrationOutcome;

/// Result of migrating one user.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct UserReport {
    /// Source user id.
    #[tabled(rename = "User")]
    pub user_id: String,
    /// Terminal state, absent when the migration aborted with an error.
    #[tabled(rename = "Outcome", display_with = "display_outcome")]
    pub outcome: Option<MigrationOutcome>,
    /// Error that aborted the migration.
    #[tabled(rename = "Error", display_with = "display_error")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn display_outcome(outcome: &Option<MigrationOutcome>) -> String {
    outcome.map_or_else(|| "aborted".to_string(), |o| o.to_string())
}

fn display_error(error: &Option<String>) -> String {
    error.clone().unwrap_or_default()
}

impl UserReport {
    /// A migration that reached a terminal state.
    pub fn finished(user_id: impl Into<String>, outcome: MigrationOutcome) -> Self {
        Self {
            user_id: user_id.into(),
            outcome: Some(outcome),
            error: None,
        }
    }

    /// A migration aborted by an error.
    pub fn aborted(user_id: impl Into<String>, error: &crate::CliError) -> Self {
        Self {
            user_id: user_id.into(),
            outcome: None,
            error: Some(error.to_string()),
        }
    }

    /// Whether the user was fully migrated.
    pub fn is_completed(&self) -> bool {
        self.outcome.is_some_and(MigrationOutcome::is_completed)
    }
}

/// Results of every user attempted in one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    /// One entry per attempted user, in processing order.
    pub users: Vec<UserReport>,
}

impl MigrationReport {
    /// Appends one user's result.
    pub fn push(&mut self, entry: UserReport) {
        self.users.push(entry);
    }

    /// Number of fully migrated users.
    pub fn completed(&self) -> usize {
        self.users.iter().filter(|u| u.is_completed()).count()
    }

    /// Number of attempted users.
    pub fn attempted(&self) -> usize {
        self.users.len()
    }
}
