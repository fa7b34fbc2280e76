//! User metadata DTOs.

use serde::{Deserialize, Serialize};

/// Free-form metadata document. Passed through without schema validation.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Response of a metadata read or update.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataResponse {
    /// The stored document; the service answers `{}` when none exists.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Request to overwrite a user's metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdateRequest<'a> {
    /// Target user.
    pub user_id: &'a str,
    /// Document applied by the service.
    pub metadata_update: &'a Metadata,
}
