//! Write operations against the destination tenant.

use std::time::Duration;

use futures::future::join_all;

use crate::client::{body_status, paths, status_error, STATUS_OK};
use crate::dto::mapping::UNKNOWN_SUPERTOKENS_USER_ID_ERROR;
use crate::dto::{
    AssignRoleRequest, AssignRoleResponse, MapUserIdRequest, Metadata, MetadataResponse,
    MetadataUpdateRequest, SignInUpRequest, SignInUpResponse,
};
use crate::{AdminClient, ApiError, ApiResult};

/// Result of an id mapping call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingStatus {
    /// The mapping was created by this call.
    Mapped,
    /// The mapping already existed and the user resolves to the external id.
    AlreadyMapped,
}

/// One applied role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Role name.
    pub role: String,
    /// Whether the user held the role before the call.
    pub already_had: bool,
}

/// Result of a metadata overwrite.
#[derive(Debug, Clone)]
pub struct MetadataWrite {
    /// Whether the destination held non-empty metadata before the write.
    pub overwrote_existing: bool,
    /// Document stored after the write, as echoed by the service.
    pub metadata: Metadata,
}

impl AdminClient {
    /// Creates a user through a third-party login, or finds the existing one.
    pub async fn sign_in_up(&self, request: &SignInUpRequest) -> ApiResult<SignInUpResponse> {
        let response: SignInUpResponse = self.post(paths::SIGN_IN_UP, request).await?;
        if !response.created_new_user {
            tracing::debug!(email = %request.email.id, user_id = %response.user.id, "user already existed");
        }
        Ok(response)
    }

    /// Maps a generated user id to an external id.
    ///
    /// An `UNKNOWN_SUPERTOKENS_USER_ID_ERROR` answer is accepted only when
    /// the external id already resolves to a user with that id.
    pub async fn map_user_id(
        &self,
        generated_user_id: &str,
        external_user_id: &str,
    ) -> ApiResult<MappingStatus> {
        let request = MapUserIdRequest {
            super_tokens_user_id: generated_user_id.to_string(),
            external_user_id: external_user_id.to_string(),
        };
        let body = self.post_raw(paths::USER_ID_MAP, &request).await?;

        match body_status(&body) {
            Some(STATUS_OK) => Ok(MappingStatus::Mapped),
            Some(UNKNOWN_SUPERTOKENS_USER_ID_ERROR) => {
                match self.get_user(external_user_id).await? {
                    Some(user) if user.id == external_user_id => Ok(MappingStatus::AlreadyMapped),
                    _ => Err(ApiError::UnverifiedMapping {
                        external_user_id: external_user_id.to_string(),
                    }),
                }
            }
            _ => Err(status_error(paths::USER_ID_MAP, &body)),
        }
    }

    /// Assigns every role concurrently.
    ///
    /// All calls run to completion. If any failed, the first failure is
    /// returned together with the roles that were applied; applied roles are
    /// not rolled back. `settle` is slept after each successful call.
    pub async fn assign_roles(
        &self,
        user_id: &str,
        roles: &[String],
        settle: Duration,
    ) -> ApiResult<Vec<RoleAssignment>> {
        let calls = roles.iter().map(|role| async move {
            let request = AssignRoleRequest { user_id, role };
            let result: ApiResult<AssignRoleResponse> = self.put(paths::USER_ROLE, &request).await;
            if result.is_ok() {
                tokio::time::sleep(settle).await;
            }
            (role.as_str(), result)
        });

        let mut assigned = Vec::with_capacity(roles.len());
        let mut failure = None;
        for (role, result) in join_all(calls).await {
            match result {
                Ok(response) => assigned.push(RoleAssignment {
                    role: role.to_string(),
                    already_had: response.did_user_already_have_role,
                }),
                Err(err) if failure.is_none() => failure = Some((role, err)),
                Err(err) => tracing::error!(user_id, role, error = %err, "role assignment failed"),
            }
        }

        match failure {
            Some((role, source)) => Err(ApiError::RoleAssignment {
                user_id: user_id.to_string(),
                role: role.to_string(),
                applied: assigned.into_iter().map(|a| a.role).collect(),
                source: Box::new(source),
            }),
            None => Ok(assigned),
        }
    }

    /// Overwrites a user's metadata.
    ///
    /// Existing metadata is read first only to report whether it was
    /// overwritten; `settle` is slept between that read and the write.
    pub async fn update_metadata(
        &self,
        user_id: &str,
        metadata: &Metadata,
        settle: Duration,
    ) -> ApiResult<MetadataWrite> {
        let existing = self.get_user_metadata(user_id).await?;
        tokio::time::sleep(settle).await;

        let request = MetadataUpdateRequest {
            user_id,
            metadata_update: metadata,
        };
        let response: MetadataResponse = self.put(paths::USER_METADATA, &request).await?;

        Ok(MetadataWrite {
            overwrote_existing: !existing.is_empty(),
            metadata: response.metadata,
        })
    }
}
