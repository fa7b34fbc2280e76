//! Role DTOs.

use serde::{Deserialize, Serialize};

/// Roles held by one user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRolesResponse {
    /// Role names.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Users holding one role.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleUsersResponse {
    /// User ids.
    #[serde(default)]
    pub users: Vec<String>,
}

/// Request to add a role to a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest<'a> {
    /// Target user.
    pub user_id: &'a str,
    /// Role name.
    pub role: &'a str,
}

/// Response of a role assignment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleResponse {
    /// Whether the role was already present.
    #[serde(default)]
    pub did_user_already_have_role: bool,
}
