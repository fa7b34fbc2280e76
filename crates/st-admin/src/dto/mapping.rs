//! User id mapping DTOs.

use serde::{Deserialize, Serialize};

/// Body status returned when the generated id is unknown, which also happens
/// when the mapping was already applied on an earlier run.
pub const UNKNOWN_SUPERTOKENS_USER_ID_ERROR: &str = "UNKNOWN_SUPERTOKENS_USER_ID_ERROR";

/// Request to map a generated user id to an external id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MapUserIdRequest {
    /// Id generated by the destination tenant on sign-up.
    pub super_tokens_user_id: String,
    /// Id that becomes the durable external reference.
    pub external_user_id: String,
}
