//! GraphQL object and input types for the cohort schema

use async_graphql::{InputObject, Json, SimpleObject, ID};
use serde::Serialize;
use serde_json::Value;

use crate::types::{EmailAddress, Invite, MemberRecord, RoleChange, RoleRecord};

/// Serialize an adapter record into a JSON scalar
///
/// A record that fails to serialize is exposed as `null`.
fn to_json<T: Serialize>(value: &T, kind: &'static str) -> Json<Value> {
    let value = serde_json::to_value(value).unwrap_or_else(|err| {
        tracing::warn!(error = %err, kind, "failed to serialize cohort record");
        Value::Null
    });
    Json(value)
}

#[derive(InputObject, Debug, Clone)]
pub struct CohortMemberInviteInput {
    /// Email address of the member to send the invitation to
    pub email: EmailAddress,

    /// IDs of any roles the invited member should be assigned when they accept the invite
    #[graphql(name = "roleIDs")]
    pub role_ids: Option<Vec<ID>>,

    /// Metadata to be associated with the invited member once accepted
    pub metadata: Json<Value>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMemberInvite {
    pub id: ID,
    pub email: EmailAddress,
    pub metadata: Json<Value>,
    #[graphql(name = "roleIDs")]
    pub role_ids: Vec<ID>,
}

impl CohortMemberInvite {
    pub fn from_invite<M: Serialize>(invite: &Invite<M>) -> Self {
        Self {
            id: ID(invite.id.clone()),
            email: EmailAddress::new_unchecked(invite.email.clone()),
            metadata: to_json(&invite.metadata, "invite metadata"),
            role_ids: invite.role_ids.iter().cloned().map(ID).collect(),
        }
    }
}

/// A cohort member; `attributes` is the adapter's serialized member record
#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMember {
    pub id: ID,
    pub attributes: Json<Value>,
}

impl CohortMember {
    pub fn from_record<M: MemberRecord>(member: &M) -> Self {
        Self {
            id: ID(member.id().to_owned()),
            attributes: to_json(member, "member"),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortRole {
    pub id: ID,
    pub name: String,
    pub description: Option<String>,
    pub attributes: Json<Value>,
}

impl CohortRole {
    pub fn from_record<R: RoleRecord>(role: &R) -> Self {
        Self {
            id: ID(role.id().to_owned()),
            name: role.name().to_owned(),
            description: role.description().map(str::to_owned),
            attributes: to_json(role, "role"),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortRedeemMemberInvite {
    /// Member created from the invite
    pub member: CohortMember,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMemberRoleChange {
    /// ID of the member the role change was applied to
    #[graphql(name = "memberID")]
    pub member_id: ID,

    /// Details of the role that was added or removed
    pub role: CohortRole,
}

impl CohortMemberRoleChange {
    pub fn from_change<R: RoleRecord>(change: &RoleChange<R>) -> Self {
        Self {
            member_id: ID(change.member_id.clone()),
            role: CohortRole::from_record(&change.role),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMemberDelete {
    /// Member as it was before deletion
    pub member: CohortMember,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMemberInviteList {
    pub items: Vec<CohortMemberInvite>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMemberList {
    pub items: Vec<CohortMember>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortRoleList {
    pub items: Vec<CohortRole>,
}
