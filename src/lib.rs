//! # cohort-management
//!
//! Pluggable cohort management for GraphQL services: member invites, members,
//! and role assignment, with storage and auth delegated to the host.
//!
//! ## Features
//!
//! - **Adapter Contract** - One trait for storage, identity, and invite delivery
//! - **Auth Guard** - Authenticate and authorize before every gated operation
//! - **Typed Results** - Domain failures as GraphQL unions with `reason` + `message`
//! - **Operator Hook** - Unexpected failures reported once, with their cause chain
//! - **Axum Handler** - Request context built from HTTP headers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cohort_management::{build_schema, CohortConfig, CohortService};
//!
//! let service = CohortService::new(MyAdapter::new(pool), CohortConfig::default());
//! let schema = build_schema(service);
//! ```

pub mod adapter;
pub mod auth;
pub mod config;
pub mod errors;
pub mod graphql;
pub mod guard;
pub mod operations;
pub mod service;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use adapter::{AdapterError, AdapterResult, CohortAdapter, PermissionSlot, PermissionSlots};
pub use auth::{
    extract_bearer_token, extract_header, extract_uuid, graphql_handler, FromRequestHeaders,
};
pub use config::{CohortConfig, ResendInvitePolicy};
pub use errors::{
    InviteMemberError, MemberDeleteError, OperationError, RedeemMemberInviteError,
    ResendMemberInviteError, RevokeMemberInviteError, RoleChangeError, UnexpectedError,
};
pub use graphql::{build_schema, CohortMutation, CohortQuery, CohortSchema};
pub use service::{CohortService, OperationResult, QueryResult};
pub use types::{EmailAddress, Invite, MemberRecord, NewInvite, RoleChange, RoleRecord};
