//! Administration API error types.

use thiserror::Error;

/// Errors raised while talking to the identity service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx HTTP status.
    #[error("request to {path} failed with HTTP {status}: {body}")]
    Transport {
        /// Request path, without the connection URI.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body carried a `status` other than `"OK"`.
    #[error("request to {path} returned status {status}")]
    Status {
        /// Request path, without the connection URI.
        path: String,
        /// Value of the body's `status` field.
        status: String,
        /// Raw response body.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An id mapping was reported as unknown and the destination user did not
    /// resolve to the expected external id.
    #[error("failed to verify existing id mapping for user {external_user_id}")]
    UnverifiedMapping {
        /// The external id the mapping should have produced.
        external_user_id: String,
    },

    /// One of the concurrent role assignments failed.
    #[error("assigning role '{role}' to user {user_id} failed (applied: {applied:?}): {source}")]
    RoleAssignment {
        /// User the roles were assigned to.
        user_id: String,
        /// First role whose assignment failed.
        role: String,
        /// Roles that were applied before the failure surfaced.
        applied: Vec<String>,
        /// Underlying failure.
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// Returns the service-level status code, if this is a [`ApiError::Status`].
    pub fn service_status(&self) -> Option<&str> {
        match self {
            Self::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// Administration API result type.
pub type ApiResult<T> = Result<T, ApiError>;
