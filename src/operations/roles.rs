use crate::adapter::{CohortAdapter, PermissionSlot};
use crate::errors::{Failure, RoleChangeError, UnexpectedExt};
use crate::service::{CohortService, OperationResult, QueryResult};
use crate::types::{MemberRecord, RoleChange};

use super::resolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Assign,
    Unassign,
}

impl<A: CohortAdapter> CohortService<A> {
    #[tracing::instrument(name = "cohort_member_add_role", skip(self, ctx))]
    pub async fn member_add_role(
        &self,
        ctx: Option<&A::RequestContext>,
        member_id: &str,
        role_id: &str,
    ) -> OperationResult<RoleChange<A::Role>, RoleChangeError> {
        let outcome = self
            .change_role(ctx, resolver::MEMBER_ADD_ROLE, member_id, role_id, Change::Assign)
            .await;
        self.finish(resolver::MEMBER_ADD_ROLE, outcome).await
    }

    #[tracing::instrument(name = "cohort_member_remove_role", skip(self, ctx))]
    pub async fn member_remove_role(
        &self,
        ctx: Option<&A::RequestContext>,
        member_id: &str,
        role_id: &str,
    ) -> OperationResult<RoleChange<A::Role>, RoleChangeError> {
        let outcome = self
            .change_role(ctx, resolver::MEMBER_REMOVE_ROLE, member_id, role_id, Change::Unassign)
            .await;
        self.finish(resolver::MEMBER_REMOVE_ROLE, outcome).await
    }

    /// Role is looked up before the member
    async fn change_role(
        &self,
        ctx: Option<&A::RequestContext>,
        resolver: &'static str,
        member_id: &str,
        role_id: &str,
        change: Change,
    ) -> Result<RoleChange<A::Role>, Failure<RoleChangeError>> {
        let adapter = self.adapter();
        self.authorize(ctx, resolver, PermissionSlot::RoleAssign).await?;

        let role = adapter
            .find_role_by_id(role_id)
            .await
            .or_unexpected(resolver)?
            .ok_or_else(|| RoleChangeError::UnknownRole {
                role_id: role_id.to_owned(),
            })?;

        let member = adapter
            .find_member_by_id(member_id)
            .await
            .or_unexpected(resolver)?
            .ok_or_else(|| RoleChangeError::MemberNotFound {
                member_id: member_id.to_owned(),
            })?;

        let applied = match change {
            Change::Assign => adapter.assign_role(&member, &role).await,
            Change::Unassign => adapter.unassign_role(&member, &role).await,
        };
        applied.or_unexpected(resolver)?;

        tracing::info!(?change, "member role changed");

        Ok(RoleChange {
            member_id: member.id().to_owned(),
            role,
        })
    }

    #[tracing::instrument(name = "cohort_roles", skip_all)]
    pub async fn list_roles(&self, ctx: Option<&A::RequestContext>) -> QueryResult<Vec<A::Role>> {
        let outcome = async {
            const RESOLVER: &str = resolver::ROLES;
            self.authorize(ctx, RESOLVER, PermissionSlot::RoleRead).await?;
            self.adapter().list_roles().await.or_unexpected(RESOLVER)
        }
        .await;

        self.finish_query(outcome).await
    }
}
