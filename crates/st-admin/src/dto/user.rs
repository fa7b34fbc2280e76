//! User DTOs.

use serde::{Deserialize, Serialize};

/// Body status of a profile read for an id the tenant does not know.
pub const UNKNOWN_USER_ID_ERROR: &str = "UNKNOWN_USER_ID_ERROR";

/// A user as returned by `GET /user/id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// User id (the external id once a mapping exists).
    pub id: String,
    /// Whether this is a primary (linked) user.
    #[serde(default)]
    pub is_primary_user: bool,
    /// Tenants the user belongs to.
    #[serde(default)]
    pub tenant_ids: Vec<String>,
    /// Join time in epoch milliseconds.
    #[serde(default)]
    pub time_joined: u64,
    /// Email addresses across all login methods.
    #[serde(default)]
    pub emails: Vec<String>,
    /// Phone numbers across all login methods.
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    /// Third-party identities.
    #[serde(default)]
    pub third_party: Vec<ThirdPartyBinding>,
    /// Individual login methods.
    #[serde(default)]
    pub login_methods: Vec<LoginMethod>,
}

impl UserRecord {
    /// First email address, the only one carried over on re-creation.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// First third-party binding, the only one carried over on re-creation.
    pub fn primary_third_party(&self) -> Option<&ThirdPartyBinding> {
        self.third_party.first()
    }
}

/// A provider identity attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyBinding {
    /// Provider id, e.g. `google`.
    pub id: String,
    /// User id at the provider.
    pub user_id: String,
}

/// One login method of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginMethod {
    /// Recipe, e.g. `thirdparty` or `emailpassword`.
    pub recipe_id: String,
    /// Recipe-level user id.
    pub recipe_user_id: String,
    /// Tenants this method is enabled for.
    #[serde(default)]
    pub tenant_ids: Vec<String>,
    /// Whether the email or phone number is verified.
    #[serde(default)]
    pub verified: bool,
    /// Join time in epoch milliseconds.
    #[serde(default)]
    pub time_joined: u64,
    /// Email, for email-based recipes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number, for passwordless recipes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Provider identity, for the third-party recipe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party: Option<ThirdPartyBinding>,
}

/// Body of `GET /user/id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    /// The user, absent when the service has none.
    #[serde(default)]
    pub user: Option<UserRecord>,
}

/// Email part of a sign-in/up request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPayload {
    /// Email address.
    pub id: String,
    /// Whether to mark it verified.
    pub is_verified: bool,
}

/// Request to create (or find) a user via a third-party login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInUpRequest {
    /// Provider id.
    pub third_party_id: String,
    /// User id at the provider.
    pub third_party_user_id: String,
    /// Email to attach.
    pub email: EmailPayload,
}

impl SignInUpRequest {
    /// Builds the request from a source user's first binding and first email.
    ///
    /// Returns `None` when either is missing.
    pub fn from_record(record: &UserRecord) -> Option<Self> {
        let binding = record.primary_third_party()?;
        let email = record.primary_email()?;
        Some(Self {
            third_party_id: binding.id.clone(),
            third_party_user_id: binding.user_id.clone(),
            email: EmailPayload {
                id: email.to_string(),
                is_verified: false,
            },
        })
    }
}

/// Body of `POST /recipe/signinup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInUpResponse {
    /// Whether a new user was created (false: an existing one was found).
    #[serde(default)]
    pub created_new_user: bool,
    /// The created or found user.
    pub user: UserRecord,
}
