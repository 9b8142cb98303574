//! Query and mutation roots
//!
//! Resolvers are thin: they read the [`CohortService`] from schema data and
//! the adapter's request context from request data, run the operation, and
//! map the outcome. Mutations always resolve to their result union. A failed
//! query resolves to `null` and adds one error carrying the public message;
//! sibling fields still resolve.

use std::marker::PhantomData;

use async_graphql::{Context, EmptySubscription, Error, Object, Result, Schema, SchemaBuilder, ID};

use crate::adapter::CohortAdapter;
use crate::auth::get_request_context;
use crate::errors::UnexpectedError;
use crate::service::CohortService;
use crate::types::NewInvite;

use super::objects::{
    CohortMember, CohortMemberInvite, CohortMemberInviteInput, CohortMemberInviteList,
    CohortMemberList, CohortRole, CohortRoleList,
};
use super::results::{
    CohortMemberDeleteResult, CohortMemberInviteResult, CohortMemberRoleChangeResult,
    CohortRedeemMemberInviteResult, CohortResendMemberInviteResult, CohortRevokeMemberInviteResult,
};

/// Standalone cohort schema
pub type CohortSchema<A> = Schema<CohortQuery<A>, CohortMutation<A>, EmptySubscription>;

/// Schema builder with the service registered as schema data
///
/// Use this to add host data or extensions before `finish()`.
pub fn schema_builder<A: CohortAdapter>(
    service: CohortService<A>,
) -> SchemaBuilder<CohortQuery<A>, CohortMutation<A>, EmptySubscription> {
    Schema::build(CohortQuery::default(), CohortMutation::default(), EmptySubscription).data(service)
}

pub fn build_schema<A: CohortAdapter>(service: CohortService<A>) -> CohortSchema<A> {
    schema_builder(service).finish()
}

fn service<'a, A: CohortAdapter>(ctx: &'a Context<'_>) -> Result<&'a CohortService<A>> {
    ctx.data::<CohortService<A>>()
}

/// Resolve a failed query to `null` with one error carrying the public message
fn null_with_error<T>(ctx: &Context<'_>, err: UnexpectedError) -> Option<T> {
    ctx.add_error(Error::new(err.public_message()).into_server_error(ctx.item.pos));
    None
}

pub struct CohortQuery<A>(PhantomData<A>);

impl<A> Default for CohortQuery<A> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[Object(name = "Query")]
impl<A: CohortAdapter> CohortQuery<A> {
    async fn cohort_member_invites_count(&self, ctx: &Context<'_>) -> Result<Option<u64>> {
        let outcome = service::<A>(ctx)?
            .count_invites(get_request_context::<A>(ctx))
            .await;
        Ok(match outcome {
            Ok(count) => Some(count),
            Err(err) => null_with_error(ctx, err),
        })
    }

    async fn cohort_member_invites(&self, ctx: &Context<'_>) -> Result<Option<CohortMemberInviteList>> {
        let outcome = service::<A>(ctx)?
            .list_invites(get_request_context::<A>(ctx))
            .await;
        Ok(match outcome {
            Ok(invites) => Some(CohortMemberInviteList {
                items: invites.iter().map(CohortMemberInvite::from_invite).collect(),
            }),
            Err(err) => null_with_error(ctx, err),
        })
    }

    /// Search for cohort members or list all members if no query is provided
    async fn cohort_members(
        &self,
        ctx: &Context<'_>,
        query: Option<String>,
    ) -> Result<Option<CohortMemberList>> {
        let outcome = service::<A>(ctx)?
            .members(get_request_context::<A>(ctx), query.as_deref())
            .await;
        Ok(match outcome {
            Ok(members) => Some(CohortMemberList {
                items: members.iter().map(CohortMember::from_record).collect(),
            }),
            Err(err) => null_with_error(ctx, err),
        })
    }

    /// Get a single cohort member by ID
    async fn cohort_member(&self, ctx: &Context<'_>, id: ID) -> Result<Option<CohortMember>> {
        let outcome = service::<A>(ctx)?
            .get_member(get_request_context::<A>(ctx), &id)
            .await;
        Ok(match outcome {
            Ok(member) => member.as_ref().map(CohortMember::from_record),
            Err(err) => null_with_error(ctx, err),
        })
    }

    /// List all roles that can be assigned to members
    async fn cohort_roles(&self, ctx: &Context<'_>) -> Result<Option<CohortRoleList>> {
        let outcome = service::<A>(ctx)?
            .list_roles(get_request_context::<A>(ctx))
            .await;
        Ok(match outcome {
            Ok(roles) => Some(CohortRoleList {
                items: roles.iter().map(CohortRole::from_record).collect(),
            }),
            Err(err) => null_with_error(ctx, err),
        })
    }
}

pub struct CohortMutation<A>(PhantomData<A>);

impl<A> Default for CohortMutation<A> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[Object(name = "Mutation")]
impl<A: CohortAdapter> CohortMutation<A> {
    /// Invite a new member by email address
    async fn cohort_invite_member(
        &self,
        ctx: &Context<'_>,
        input: CohortMemberInviteInput,
    ) -> Result<CohortMemberInviteResult> {
        let service = service::<A>(ctx)?;
        let metadata: A::MetadataInput = serde_json::from_value(input.metadata.0)
            .map_err(|err| Error::new(format!("Invalid metadata: {err}")))?;
        let invite = NewInvite {
            email: input.email,
            role_ids: input.role_ids.unwrap_or_default().into_iter().map(|id| id.0).collect(),
            metadata,
        };

        let outcome = service.invite_member(get_request_context::<A>(ctx), invite).await;
        Ok(CohortMemberInviteResult::from_outcome(outcome))
    }

    /// Revoke a pending member invite. This action will prevent the invite from being accepted, but it
    /// will not rescind the email if it has already been sent. The email may still be delivered even
    /// after revocation.
    async fn cohort_revoke_member_invite(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "inviteID")] invite_id: ID,
    ) -> Result<CohortRevokeMemberInviteResult> {
        let outcome = service::<A>(ctx)?
            .revoke_member_invite(get_request_context::<A>(ctx), &invite_id)
            .await;
        Ok(CohortRevokeMemberInviteResult::from_outcome(outcome))
    }

    /// Accept a member invite, creating the member
    async fn cohort_redeem_member_invite(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "inviteID")] invite_id: ID,
    ) -> Result<CohortRedeemMemberInviteResult> {
        let outcome = service::<A>(ctx)?
            .redeem_member_invite(get_request_context::<A>(ctx), &invite_id)
            .await;
        Ok(CohortRedeemMemberInviteResult::from_outcome(outcome))
    }

    /// Send the invite email again
    async fn cohort_resend_member_invite(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "inviteID")] invite_id: ID,
    ) -> Result<CohortResendMemberInviteResult> {
        let outcome = service::<A>(ctx)?
            .resend_member_invite(get_request_context::<A>(ctx), &invite_id)
            .await;
        Ok(CohortResendMemberInviteResult::from_outcome(outcome))
    }

    /// Add role to the given member.
    async fn cohort_member_add_role(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "memberID")] member_id: ID,
        #[graphql(name = "roleID")] role_id: ID,
    ) -> Result<CohortMemberRoleChangeResult> {
        let outcome = service::<A>(ctx)?
            .member_add_role(get_request_context::<A>(ctx), &member_id, &role_id)
            .await;
        Ok(CohortMemberRoleChangeResult::from_outcome(outcome))
    }

    /// Remove role from the given member.
    async fn cohort_member_remove_role(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "memberID")] member_id: ID,
        #[graphql(name = "roleID")] role_id: ID,
    ) -> Result<CohortMemberRoleChangeResult> {
        let outcome = service::<A>(ctx)?
            .member_remove_role(get_request_context::<A>(ctx), &member_id, &role_id)
            .await;
        Ok(CohortMemberRoleChangeResult::from_outcome(outcome))
    }

    /// Delete a member
    async fn cohort_delete_member(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "memberID")] member_id: ID,
    ) -> Result<CohortMemberDeleteResult> {
        let outcome = service::<A>(ctx)?
            .delete_member(get_request_context::<A>(ctx), &member_id)
            .await;
        Ok(CohortMemberDeleteResult::from_outcome(outcome))
    }
}
