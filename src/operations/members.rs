use crate::adapter::{CohortAdapter, PermissionSlot};
use crate::errors::{Failure, MemberDeleteError, UnexpectedExt};
use crate::service::{CohortService, OperationResult, QueryResult};

use super::resolver;

impl<A: CohortAdapter> CohortService<A> {
    /// Delete a member, returning the member as it was before deletion
    #[tracing::instrument(name = "cohort_delete_member", skip(self, ctx))]
    pub async fn delete_member(
        &self,
        ctx: Option<&A::RequestContext>,
        member_id: &str,
    ) -> OperationResult<A::Member, MemberDeleteError> {
        let outcome = async {
            const RESOLVER: &str = resolver::DELETE_MEMBER;
            self.authorize(ctx, RESOLVER, PermissionSlot::MemberDelete).await?;

            let member = self
                .adapter()
                .find_member_by_id(member_id)
                .await
                .or_unexpected(RESOLVER)?
                .ok_or_else(|| MemberDeleteError::MemberNotFound {
                    member_id: member_id.to_owned(),
                })?;

            self.adapter().delete_member(&member).await.or_unexpected(RESOLVER)?;

            tracing::info!("member deleted");
            Ok::<_, Failure<MemberDeleteError>>(member)
        }
        .await;

        self.finish(resolver::DELETE_MEMBER, outcome).await
    }

    /// Single member by ID, `None` when there is no such member
    #[tracing::instrument(name = "cohort_member", skip(self, ctx))]
    pub async fn get_member(
        &self,
        ctx: Option<&A::RequestContext>,
        member_id: &str,
    ) -> QueryResult<Option<A::Member>> {
        let outcome = async {
            const RESOLVER: &str = resolver::MEMBER;
            self.authorize(ctx, RESOLVER, PermissionSlot::MemberRead).await?;
            self.adapter().find_member_by_id(member_id).await.or_unexpected(RESOLVER)
        }
        .await;

        self.finish_query(outcome).await
    }

    pub async fn list_members(&self, ctx: Option<&A::RequestContext>) -> QueryResult<Vec<A::Member>> {
        self.members(ctx, None).await
    }

    pub async fn search_members(
        &self,
        ctx: Option<&A::RequestContext>,
        query: &str,
    ) -> QueryResult<Vec<A::Member>> {
        self.members(ctx, Some(query)).await
    }

    /// Search members, or list all of them when there is no query
    #[tracing::instrument(name = "cohort_members", skip(self, ctx))]
    pub async fn members(
        &self,
        ctx: Option<&A::RequestContext>,
        query: Option<&str>,
    ) -> QueryResult<Vec<A::Member>> {
        let outcome = async {
            const RESOLVER: &str = resolver::MEMBERS;
            self.authorize(ctx, RESOLVER, PermissionSlot::MemberRead).await?;
            let found = match query {
                Some(query) => self.adapter().search_members(query).await,
                None => self.adapter().list_members().await,
            };
            found.or_unexpected(RESOLVER)
        }
        .await;

        self.finish_query(outcome).await
    }
}
