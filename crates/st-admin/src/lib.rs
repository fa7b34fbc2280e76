//! # st-admin
//!
//! Typed client for the SuperTokens core administration API.
//!
//! This crate provides:
//! - An authenticated per-tenant HTTP client that rejects non-2xx responses
//!   and bodies whose `status` is not `"OK"`
//! - Profile, metadata and role reads
//! - Sign-up, id mapping, role assignment and metadata writes

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod dto;
pub mod error;
pub mod reader;
pub mod writer;

pub use client::{AdminClient, Credentials};
pub use error::{ApiError, ApiResult};
pub use reader::DEFAULT_COMMON_ROLE;
pub use writer::{MappingStatus, MetadataWrite, RoleAssignment};
