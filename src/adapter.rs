//! Adapter contract between the cohort core and the host application
//!
//! The core never stores anything itself. Storage, identity, and invite
//! delivery are all delegated to a [`CohortAdapter`] supplied at construction
//! time. Every method is mandatory; lookups signal absence with `Ok(None)`
//! and reserve `Err` for genuine failures.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::UnexpectedError;
use crate::types::{Invite, MemberRecord, NewInvite, RoleRecord};

/// Failure raised by an adapter call
pub type AdapterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for adapter calls
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Concrete permission values for each authorization checkpoint of the core
///
/// The representation `P` is chosen by the adapter (strings, enums, bit
/// flags, ...). It is passed back verbatim to [`CohortAdapter::authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSlots<P> {
    pub invite_create: P,
    pub invite_read: P,
    pub invite_delete: P,
    pub member_read: P,
    pub member_delete: P,
    pub role_read: P,
    pub role_assign: P,
}

/// Names one of the core's authorization checkpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionSlot {
    InviteCreate,
    InviteRead,
    InviteDelete,
    MemberRead,
    MemberDelete,
    RoleRead,
    RoleAssign,
}

impl<P> PermissionSlots<P> {
    pub fn get(&self, slot: PermissionSlot) -> &P {
        match slot {
            PermissionSlot::InviteCreate => &self.invite_create,
            PermissionSlot::InviteRead => &self.invite_read,
            PermissionSlot::InviteDelete => &self.invite_delete,
            PermissionSlot::MemberRead => &self.member_read,
            PermissionSlot::MemberDelete => &self.member_delete,
            PermissionSlot::RoleRead => &self.role_read,
            PermissionSlot::RoleAssign => &self.role_assign,
        }
    }
}

impl PermissionSlots<String> {
    /// `cohort:<resource>:<action>` naming used by the bundled schema docs
    pub fn cohort_defaults() -> Self {
        Self {
            invite_create: "cohort:invite:create".to_string(),
            invite_read: "cohort:invite:read".to_string(),
            invite_delete: "cohort:invite:delete".to_string(),
            member_read: "cohort:member:read".to_string(),
            member_delete: "cohort:member:delete".to_string(),
            role_read: "cohort:role:read".to_string(),
            role_assign: "cohort:role:assign".to_string(),
        }
    }
}

/// Storage, auth, and notification capabilities the core depends on
///
/// # Example
///
/// ```rust,ignore
/// use cohort_management::{CohortAdapter, CohortService, CohortConfig};
///
/// let service = CohortService::new(MyAdapter::connect(&pool), CohortConfig::default());
/// let schema = cohort_management::graphql::build_schema(service);
/// ```
#[async_trait]
pub trait CohortAdapter: Send + Sync + 'static {
    /// Per-request input handed in by the transport (headers, session, ...)
    type RequestContext: Send + Sync + 'static;

    /// Actor identity produced by [`authenticate`](Self::authenticate)
    type AuthContext: Send + Sync;

    type Permission: Clone + fmt::Display + Send + Sync + 'static;

    /// Invite metadata as stored
    type Metadata: Serialize + Send + Sync + 'static;

    /// Invite metadata as accepted from callers
    type MetadataInput: DeserializeOwned + Send + Sync + 'static;

    type Member: MemberRecord;

    type Role: RoleRecord;

    /// Permission values for each checkpoint
    fn permissions(&self) -> &PermissionSlots<Self::Permission>;

    /// Operator hook, called once for every unexpected error
    ///
    /// Use it to log or forward to a monitoring service. It cannot influence
    /// the result returned to the caller.
    async fn on_unexpected_error(&self, error: &UnexpectedError);

    // Auth

    async fn authenticate(
        &self,
        ctx: &Self::RequestContext,
    ) -> AdapterResult<Option<Self::AuthContext>>;

    async fn authorize(
        &self,
        auth: &Self::AuthContext,
        permissions: &[Self::Permission],
    ) -> AdapterResult<bool>;

    // Invites

    async fn create_invite(
        &self,
        invite: NewInvite<Self::MetadataInput>,
    ) -> AdapterResult<Invite<Self::Metadata>>;

    /// Deliver the invite to its email address
    ///
    /// Delivery may be queued; retrying is up to the adapter. Errors are
    /// reported to the operator hook but the invite is not rolled back.
    async fn send_invite(&self, invite: &Invite<Self::Metadata>) -> AdapterResult<()>;

    async fn revoke_invite(&self, invite: &Invite<Self::Metadata>) -> AdapterResult<()>;

    /// Turn the invite into a member, assigning the invite's roles
    async fn redeem_invite(
        &self,
        ctx: &Self::RequestContext,
        invite: &Invite<Self::Metadata>,
    ) -> AdapterResult<Self::Member>;

    async fn count_invites(&self) -> AdapterResult<u64>;

    async fn list_invites(&self) -> AdapterResult<Vec<Invite<Self::Metadata>>>;

    async fn find_invite_by_id(&self, id: &str) -> AdapterResult<Option<Invite<Self::Metadata>>>;

    /// Find the outstanding (not revoked, not redeemed) invite for an email
    async fn find_invite_by_email(
        &self,
        email: &str,
    ) -> AdapterResult<Option<Invite<Self::Metadata>>>;

    // Members

    async fn find_member_by_email(&self, email: &str) -> AdapterResult<Option<Self::Member>>;

    async fn find_member_by_id(&self, id: &str) -> AdapterResult<Option<Self::Member>>;

    async fn search_members(&self, query: &str) -> AdapterResult<Vec<Self::Member>>;

    async fn list_members(&self) -> AdapterResult<Vec<Self::Member>>;

    async fn delete_member(&self, member: &Self::Member) -> AdapterResult<()>;

    // Roles

    async fn list_roles(&self) -> AdapterResult<Vec<Self::Role>>;

    async fn find_role_by_id(&self, id: &str) -> AdapterResult<Option<Self::Role>>;

    async fn assign_role(&self, member: &Self::Member, role: &Self::Role) -> AdapterResult<()>;

    async fn unassign_role(&self, member: &Self::Member, role: &Self::Role) -> AdapterResult<()>;
}
