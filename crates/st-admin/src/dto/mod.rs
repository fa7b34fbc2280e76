//! Request and response bodies of the core administration API.
//!
//! Field names follow the service's camelCase wire format. Every response
//! also carries a `status` field, which the client checks before decoding
//! into these types.

pub mod mapping;
pub mod metadata;
pub mod role;
pub mod user;

pub use mapping::MapUserIdRequest;
pub use metadata::{Metadata, MetadataResponse, MetadataUpdateRequest};
pub use role::{AssignRoleRequest, AssignRoleResponse, RoleUsersResponse, UserRolesResponse};
pub use user::{
    EmailPayload, LoginMethod, SignInUpRequest, SignInUpResponse, ThirdPartyBinding, UserRecord,
    UserResponse,
};
