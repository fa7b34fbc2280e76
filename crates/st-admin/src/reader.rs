//! Read operations against one tenant.

use crate::client::{body_status, ensure_ok, paths, with_query};
use crate::dto::user::UNKNOWN_USER_ID_ERROR;
use crate::dto::{Metadata, MetadataResponse, RoleUsersResponse, UserRecord, UserResponse, UserRolesResponse};
use crate::{AdminClient, ApiResult};

/// Role used to enumerate "all users" when none is given.
pub const DEFAULT_COMMON_ROLE: &str = "user";

impl AdminClient {
    /// Fetches a user's profile.
    ///
    /// Returns `Ok(None)` when the tenant does not know the id.
    pub async fn get_user(&self, user_id: &str) -> ApiResult<Option<UserRecord>> {
        let path = with_query(paths::USER_BY_ID, "userId", user_id);
        let body = self.get_raw(&path).await?;

        if body_status(&body) == Some(UNKNOWN_USER_ID_ERROR) {
            tracing::debug!(user_id, base_url = self.base_url(), "user not found");
            return Ok(None);
        }

        let response: UserResponse = ensure_ok(&path, body)?;
        Ok(response.user)
    }

    /// Fetches a user's metadata document (`{}` when none is stored).
    pub async fn get_user_metadata(&self, user_id: &str) -> ApiResult<Metadata> {
        let path = with_query(paths::USER_METADATA, "userId", user_id);
        let response: MetadataResponse = self.get(&path).await?;
        Ok(response.metadata)
    }

    /// Fetches the roles held by a user.
    pub async fn get_user_roles(&self, user_id: &str) -> ApiResult<Vec<String>> {
        let path = with_query(paths::USER_ROLES, "userId", user_id);
        let response: UserRolesResponse = self.get(&path).await?;
        Ok(response.roles)
    }

    /// Fetches the ids of every user holding `role`.
    pub async fn get_users_with_role(&self, role: &str) -> ApiResult<Vec<String>> {
        let path = with_query(paths::ROLE_USERS, "role", role);
        let response: RoleUsersResponse = self.get(&path).await?;
        Ok(response.users)
    }
}
