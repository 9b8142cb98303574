use futures::future::join_all;

use crate::adapter::{CohortAdapter, PermissionSlot};
use crate::config::ResendInvitePolicy;
use crate::errors::{
    Failure, InviteMemberError, RedeemMemberInviteError, ResendMemberInviteError,
    RevokeMemberInviteError, UnexpectedError, UnexpectedExt,
};
use crate::service::{CohortService, OperationResult, QueryResult};
use crate::types::{Invite, MemberRecord, NewInvite};

use super::resolver;

type InviteOf<A> = Invite<<A as CohortAdapter>::Metadata>;

impl<A: CohortAdapter> CohortService<A> {
    /// Create an invite for a new member and send it out
    ///
    /// Preconditions, in order: every role ID resolves, no outstanding invite
    /// for the email, no member with the email. The invite is persisted before
    /// delivery is attempted, so a delivery failure is reported as unexpected
    /// without undoing the invite.
    #[tracing::instrument(name = "cohort_invite_member", skip_all, fields(email = %invite.email))]
    pub async fn invite_member(
        &self,
        ctx: Option<&A::RequestContext>,
        invite: NewInvite<A::MetadataInput>,
    ) -> OperationResult<InviteOf<A>, InviteMemberError> {
        let outcome = self.try_invite_member(ctx, invite).await;
        self.finish(resolver::INVITE_MEMBER, outcome).await
    }

    async fn try_invite_member(
        &self,
        ctx: Option<&A::RequestContext>,
        mut invite: NewInvite<A::MetadataInput>,
    ) -> Result<InviteOf<A>, Failure<InviteMemberError>> {
        const RESOLVER: &str = resolver::INVITE_MEMBER;
        let adapter = self.adapter();

        self.authorize(ctx, RESOLVER, PermissionSlot::InviteCreate).await?;

        if self.config().dedupe_role_ids {
            dedupe(&mut invite.role_ids);
        }
        self.ensure_roles_exist(&invite.role_ids).await?;

        let email = invite.email.as_str();
        if adapter.find_invite_by_email(email).await.or_unexpected(RESOLVER)?.is_some() {
            return Err(InviteMemberError::AlreadyInvited { email: email.to_owned() }.into());
        }
        if adapter.find_member_by_email(email).await.or_unexpected(RESOLVER)?.is_some() {
            return Err(InviteMemberError::AlreadyMember { email: email.to_owned() }.into());
        }

        let created = adapter.create_invite(invite).await.or_unexpected(RESOLVER)?;
        tracing::info!(invite_id = %created.id, "invite created");

        if let Err(cause) = adapter.send_invite(&created).await {
            return Err(UnexpectedError::SendInviteFailed {
                invite_id: created.id.clone(),
                email: created.email.clone(),
                cause,
            }
            .into());
        }

        Ok(created)
    }

    /// Look up every role concurrently; all must exist
    ///
    /// Lookups already issued run to completion even when an earlier one
    /// fails. An adapter failure on any lookup wins over an unknown role;
    /// otherwise the first unknown role in request order is returned.
    async fn ensure_roles_exist(&self, role_ids: &[String]) -> Result<(), Failure<InviteMemberError>> {
        let adapter = self.adapter();
        let lookups = join_all(role_ids.iter().map(|id| adapter.find_role_by_id(id))).await;

        let mut unknown = None;
        for (role_id, found) in role_ids.iter().zip(lookups) {
            if found.or_unexpected(resolver::INVITE_MEMBER)?.is_none() && unknown.is_none() {
                unknown = Some(role_id.clone());
            }
        }

        match unknown {
            Some(role_id) => Err(InviteMemberError::UnknownRole { role_id }.into()),
            None => Ok(()),
        }
    }

    /// Revoke a pending invite so it can no longer be redeemed
    ///
    /// An email that was already delivered is not rescinded.
    #[tracing::instrument(name = "cohort_revoke_member_invite", skip(self, ctx))]
    pub async fn revoke_member_invite(
        &self,
        ctx: Option<&A::RequestContext>,
        invite_id: &str,
    ) -> OperationResult<InviteOf<A>, RevokeMemberInviteError> {
        let outcome = async {
            const RESOLVER: &str = resolver::REVOKE_MEMBER_INVITE;
            self.authorize(ctx, RESOLVER, PermissionSlot::InviteDelete).await?;

            let invite = self
                .adapter()
                .find_invite_by_id(invite_id)
                .await
                .or_unexpected(RESOLVER)?
                .ok_or_else(|| RevokeMemberInviteError::InviteNotFound {
                    invite_id: invite_id.to_owned(),
                })?;

            self.adapter()
                .revoke_invite(&invite)
                .await
                .map_err(|cause| UnexpectedError::RevokeInviteFailed {
                    invite_id: invite.id.clone(),
                    cause,
                })?;

            tracing::info!("invite revoked");
            Ok::<_, Failure<RevokeMemberInviteError>>(invite)
        }
        .await;

        self.finish(resolver::REVOKE_MEMBER_INVITE, outcome).await
    }

    /// Redeem an invite, creating the member
    ///
    /// Self-service: no permission is checked, but the request context is
    /// handed to the adapter so it can tie the member to the caller.
    #[tracing::instrument(name = "cohort_redeem_member_invite", skip(self, ctx))]
    pub async fn redeem_member_invite(
        &self,
        ctx: Option<&A::RequestContext>,
        invite_id: &str,
    ) -> OperationResult<A::Member, RedeemMemberInviteError> {
        let outcome = async {
            const RESOLVER: &str = resolver::REDEEM_MEMBER_INVITE;
            let ctx = ctx.ok_or_else(|| UnexpectedError::wrap(RESOLVER, "no request context was provided"))?;

            let invite = self
                .adapter()
                .find_invite_by_id(invite_id)
                .await
                .or_unexpected(RESOLVER)?
                .ok_or_else(|| RedeemMemberInviteError::InviteNotFound {
                    invite_id: invite_id.to_owned(),
                })?;

            let member = self
                .adapter()
                .redeem_invite(ctx, &invite)
                .await
                .map_err(|cause| UnexpectedError::RedeemInviteFailed {
                    invite_id: invite.id.clone(),
                    cause,
                })?;

            tracing::info!(member_id = member.id(), "invite redeemed");
            Ok::<_, Failure<RedeemMemberInviteError>>(member)
        }
        .await;

        self.finish(resolver::REDEEM_MEMBER_INVITE, outcome).await
    }

    /// Send an existing invite again without changing it
    ///
    /// Gated behind `invite.create` only under
    /// [`ResendInvitePolicy::RequireInviteCreate`].
    #[tracing::instrument(name = "cohort_resend_member_invite", skip(self, ctx))]
    pub async fn resend_member_invite(
        &self,
        ctx: Option<&A::RequestContext>,
        invite_id: &str,
    ) -> OperationResult<InviteOf<A>, ResendMemberInviteError> {
        let outcome = async {
            const RESOLVER: &str = resolver::RESEND_MEMBER_INVITE;
            if self.config().resend_invite == ResendInvitePolicy::RequireInviteCreate {
                self.authorize(ctx, RESOLVER, PermissionSlot::InviteCreate).await?;
            }

            let invite = self
                .adapter()
                .find_invite_by_id(invite_id)
                .await
                .or_unexpected(RESOLVER)?
                .ok_or_else(|| ResendMemberInviteError::InviteNotFound {
                    invite_id: invite_id.to_owned(),
                })?;

            self.adapter()
                .send_invite(&invite)
                .await
                .map_err(|cause| UnexpectedError::ResendInviteFailed {
                    invite_id: invite.id.clone(),
                    cause,
                })?;

            tracing::info!("invite resent");
            Ok::<_, Failure<ResendMemberInviteError>>(invite)
        }
        .await;

        self.finish(resolver::RESEND_MEMBER_INVITE, outcome).await
    }

    #[tracing::instrument(name = "cohort_member_invites_count", skip_all)]
    pub async fn count_invites(&self, ctx: Option<&A::RequestContext>) -> QueryResult<u64> {
        let outcome = async {
            const RESOLVER: &str = resolver::MEMBER_INVITES_COUNT;
            self.authorize(ctx, RESOLVER, PermissionSlot::InviteRead).await?;
            self.adapter().count_invites().await.or_unexpected(RESOLVER)
        }
        .await;

        self.finish_query(outcome).await
    }

    #[tracing::instrument(name = "cohort_member_invites", skip_all)]
    pub async fn list_invites(&self, ctx: Option<&A::RequestContext>) -> QueryResult<Vec<InviteOf<A>>> {
        let outcome = async {
            const RESOLVER: &str = resolver::MEMBER_INVITES;
            self.authorize(ctx, RESOLVER, PermissionSlot::InviteRead).await?;
            self.adapter().list_invites().await.or_unexpected(RESOLVER)
        }
        .await;

        self.finish_query(outcome).await
    }
}

/// Keep the first occurrence of every ID
fn dedupe(ids: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::CohortConfig;
    use crate::errors::OperationError;
    use crate::operations::test_support::{request, service};
    use crate::testing::InMemoryAdapter;
    use crate::types::EmailAddress;

    fn new_invite(email: &str, role_ids: &[&str]) -> NewInvite<serde_json::Value> {
        NewInvite {
            email: EmailAddress::parse(email).unwrap(),
            role_ids: role_ids.iter().map(|r| r.to_string()).collect(),
            metadata: json!({}),
        }
    }

    #[tokio::test]
    async fn test_invite_member_creates_and_sends() {
        let service = service(InMemoryAdapter::new());

        let invite = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&invite).unwrap(),
            json!({"id": "i1", "email": "a@x.com", "roleIDs": [], "metadata": {}})
        );

        let adapter = service.adapter();
        assert_eq!(
            adapter.call_names(),
            vec![
                "authenticate",
                "authorize",
                "find_invite_by_email",
                "find_member_by_email",
                "create_invite",
                "send_invite",
            ]
        );
        assert_eq!(adapter.calls_to("send_invite"), vec![vec!["i1".to_string()]]);
        assert!(adapter.reported().is_empty());
    }

    #[tokio::test]
    async fn test_invite_member_requires_invite_create() {
        let service = service(InMemoryAdapter::new().denying());

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap_err();

        let unexpected = err.unexpected().unwrap();
        assert_eq!(unexpected.public_message(), "Missing permission(s) cohort:invite:create");

        let adapter = service.adapter();
        assert_eq!(
            adapter.calls_to("authorize"),
            vec![vec!["test".to_string(), "cohort:invite:create".to_string()]]
        );
        assert!(adapter.calls_to("create_invite").is_empty());
        assert_eq!(adapter.reported().len(), 1);
    }

    #[tokio::test]
    async fn test_invite_member_already_invited() {
        let service = service(InMemoryAdapter::new().with_invite("i9", "a@x.com"));

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap_err();

        assert_eq!(
            err.domain(),
            Some(&InviteMemberError::AlreadyInvited { email: "a@x.com".to_string() })
        );
        assert_eq!(
            err.to_string(),
            "A member with the email `a@x.com` has already been invited"
        );
        assert!(service.adapter().calls_to("create_invite").is_empty());
        assert!(service.adapter().reported().is_empty());
    }

    #[tokio::test]
    async fn test_invite_member_already_member() {
        let service = service(InMemoryAdapter::new().with_member("m1", "a@x.com"));

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap_err();

        assert_eq!(
            err.domain(),
            Some(&InviteMemberError::AlreadyMember { email: "a@x.com".to_string() })
        );
        assert!(service.adapter().calls_to("create_invite").is_empty());
    }

    #[tokio::test]
    async fn test_invite_member_unknown_role_checked_first() {
        let service = service(
            InMemoryAdapter::new()
                .with_role("admin", "Administrator")
                .with_invite("i9", "a@x.com"),
        );

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &["admin", "ghost"]))
            .await
            .unwrap_err();

        assert_eq!(
            err.domain(),
            Some(&InviteMemberError::UnknownRole { role_id: "ghost".to_string() })
        );
        assert_eq!(err.to_string(), "Role not found with ID `ghost`");

        let adapter = service.adapter();
        assert_eq!(adapter.calls_to("find_role_by_id").len(), 2);
        assert!(adapter.calls_to("find_invite_by_email").is_empty());
        assert!(adapter.calls_to("create_invite").is_empty());
    }

    #[tokio::test]
    async fn test_invite_member_dedupes_roles() {
        let service = service(InMemoryAdapter::new().with_role("admin", "Administrator"));

        let invite = service
            .invite_member(Some(&request()), new_invite("a@x.com", &["admin", "admin"]))
            .await
            .unwrap();

        assert_eq!(invite.role_ids, vec!["admin".to_string()]);
        assert_eq!(service.adapter().calls_to("find_role_by_id").len(), 1);
    }

    #[tokio::test]
    async fn test_invite_member_keeps_duplicates_when_configured() {
        let config = CohortConfig {
            dedupe_role_ids: false,
            ..CohortConfig::default()
        };
        let service = CohortService::new(InMemoryAdapter::new().with_role("admin", "Administrator"), config);

        let invite = service
            .invite_member(Some(&request()), new_invite("a@x.com", &["admin", "admin"]))
            .await
            .unwrap();

        assert_eq!(invite.role_ids.len(), 2);
    }

    #[tokio::test]
    async fn test_invite_member_send_failure_keeps_invite() {
        let service = service(InMemoryAdapter::new().failing("send_invite"));

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OperationError::Unexpected(UnexpectedError::SendInviteFailed { .. })
        ));

        let adapter = service.adapter();
        assert_eq!(adapter.invites().len(), 1);

        let reported = adapter.reported();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].public_message, "An unexpected error occurred");
        assert_eq!(
            reported[0].chain,
            vec![
                "Failed to send invite email out to `a@x.com` for invite ID `i1`".to_string(),
                "injected failure in `send_invite`".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_invite_member_lookup_failure_is_reported_once() {
        let service = service(InMemoryAdapter::new().failing("find_member_by_email"));

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OperationError::Unexpected(UnexpectedError::Resolver {
                resolver: "Mutation.cohortInviteMember",
                ..
            })
        ));
        assert_eq!(service.adapter().reported().len(), 1);
        assert!(service.adapter().calls_to("create_invite").is_empty());
    }

    #[tokio::test]
    async fn test_revoke_member_invite() {
        let service = service(
            InMemoryAdapter::new()
                .with_invite("i1", "a@x.com")
                .with_invite("i2", "b@x.com"),
        );

        let revoked = service.revoke_member_invite(Some(&request()), "i2").await.unwrap();

        assert_eq!(revoked.email, "b@x.com");
        let adapter = service.adapter();
        assert_eq!(adapter.calls_to("find_invite_by_id"), vec![vec!["i2".to_string()]]);
        assert_eq!(adapter.calls_to("revoke_invite"), vec![vec!["i2".to_string()]]);
        assert_eq!(adapter.invites().len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_member_invite_not_found() {
        let service = service(InMemoryAdapter::new());

        let err = service.revoke_member_invite(Some(&request()), "i404").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Member invite with ID `i404` could not be found to revoke"
        );
        assert!(service.adapter().calls_to("revoke_invite").is_empty());
    }

    #[tokio::test]
    async fn test_revoke_member_invite_failure() {
        let service = service(InMemoryAdapter::new().with_invite("i1", "a@x.com").failing("revoke_invite"));

        let err = service.revoke_member_invite(Some(&request()), "i1").await.unwrap_err();

        assert!(matches!(
            err,
            OperationError::Unexpected(UnexpectedError::RevokeInviteFailed { .. })
        ));
        assert_eq!(service.adapter().reported().len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_member_invite_requires_invite_delete() {
        let service = service(InMemoryAdapter::new().denying().with_invite("i1", "a@x.com"));

        let err = service.revoke_member_invite(Some(&request()), "i1").await.unwrap_err();

        assert_eq!(
            err.unexpected().unwrap().public_message(),
            "Missing permission(s) cohort:invite:delete"
        );
        assert!(service.adapter().calls_to("find_invite_by_id").is_empty());
    }

    #[tokio::test]
    async fn test_redeem_member_invite_is_self_service() {
        let service = service(InMemoryAdapter::new().denying().with_invite("i1", "a@x.com"));

        let member = service.redeem_member_invite(Some(&request()), "i1").await.unwrap();

        assert_eq!(member.email, "a@x.com");
        let adapter = service.adapter();
        assert_eq!(adapter.call_names(), vec!["find_invite_by_id", "redeem_invite"]);
        assert!(adapter.invites().is_empty());
    }

    #[tokio::test]
    async fn test_redeem_member_invite_not_found() {
        let service = service(InMemoryAdapter::new());

        let err = service.redeem_member_invite(Some(&request()), "i404").await.unwrap_err();

        assert_eq!(
            err.domain(),
            Some(&RedeemMemberInviteError::InviteNotFound { invite_id: "i404".to_string() })
        );
        assert!(service.adapter().calls_to("redeem_invite").is_empty());
    }

    #[tokio::test]
    async fn test_redeem_member_invite_without_request_context() {
        let service = service(InMemoryAdapter::new().with_invite("i1", "a@x.com"));

        let err = service.redeem_member_invite(None, "i1").await.unwrap_err();

        assert!(err.unexpected().is_some());
        assert!(service.adapter().calls_to("redeem_invite").is_empty());
        assert_eq!(service.adapter().reported().len(), 1);
    }

    #[tokio::test]
    async fn test_resend_member_invite() {
        let service = service(InMemoryAdapter::new().denying().with_invite("i1", "a@x.com"));

        let invite = service.resend_member_invite(Some(&request()), "i1").await.unwrap();

        assert_eq!(invite.id, "i1");
        assert_eq!(
            service.adapter().call_names(),
            vec!["find_invite_by_id", "send_invite"]
        );
    }

    #[tokio::test]
    async fn test_resend_member_invite_strict_policy() {
        let adapter = InMemoryAdapter::new().denying().with_invite("i1", "a@x.com");
        let service = CohortService::new(adapter, CohortConfig::strict());

        let err = service.resend_member_invite(Some(&request()), "i1").await.unwrap_err();

        assert_eq!(
            err.unexpected().unwrap().public_message(),
            "Missing permission(s) cohort:invite:create"
        );
        assert!(service.adapter().calls_to("send_invite").is_empty());
    }

    #[tokio::test]
    async fn test_resend_member_invite_not_found_and_failure() {
        let service = service(InMemoryAdapter::new().with_invite("i1", "a@x.com").failing("send_invite"));

        let err = service.resend_member_invite(Some(&request()), "i404").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Member invite with ID `i404` could not be found to resend"
        );

        let err = service.resend_member_invite(Some(&request()), "i1").await.unwrap_err();
        assert!(matches!(
            err,
            OperationError::Unexpected(UnexpectedError::ResendInviteFailed { .. })
        ));
        assert_eq!(service.adapter().reported().len(), 1);
    }

    #[tokio::test]
    async fn test_invite_queries() {
        let service = service(
            InMemoryAdapter::new()
                .with_invite("i1", "a@x.com")
                .with_invite("i2", "b@x.com"),
        );

        assert_eq!(service.count_invites(Some(&request())).await.unwrap(), 2);

        let invites = service.list_invites(Some(&request())).await.unwrap();
        let ids: Vec<_> = invites.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i2"]);

        assert_eq!(
            service.adapter().calls_to("authorize")[0],
            vec!["test".to_string(), "cohort:invite:read".to_string()]
        );
    }

    #[tokio::test]
    async fn test_invite_queries_unauthorized() {
        let service = service(InMemoryAdapter::new().denying());

        let err = service.count_invites(Some(&request())).await.unwrap_err();

        assert_eq!(err.public_message(), "Missing permission(s) cohort:invite:read");
        assert!(service.adapter().calls_to("count_invites").is_empty());
        assert_eq!(service.adapter().reported().len(), 1);
    }

    #[tokio::test]
    async fn test_invite_member_role_lookup_failure_wins_over_unknown_role() {
        let service = service(
            InMemoryAdapter::new()
                .with_role("r2", "Reviewer")
                .failing_for("find_role_by_id", "r2"),
        );

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &["ghost", "r2"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OperationError::Unexpected(UnexpectedError::Resolver {
                resolver: "Mutation.cohortInviteMember",
                ..
            })
        ));
        let adapter = service.adapter();
        assert_eq!(adapter.calls_to("find_role_by_id").len(), 2);
        assert_eq!(adapter.reported().len(), 1);
        assert_eq!(adapter.reported()[0].chain[1], "injected failure in `find_role_by_id`");
        assert!(adapter.calls_to("create_invite").is_empty());
    }

    #[tokio::test]
    async fn test_invite_member_unauthenticated() {
        let service = service(InMemoryAdapter::new().unauthenticated());

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap_err();

        let unexpected = err.unexpected().unwrap();
        assert!(matches!(unexpected, UnexpectedError::Authentication { cause: None, .. }));
        assert_eq!(unexpected.public_message(), "An unexpected error occurred");

        let adapter = service.adapter();
        assert_eq!(adapter.call_names(), vec!["authenticate", "on_unexpected_error"]);
        assert_eq!(adapter.reported().len(), 1);
    }

    #[tokio::test]
    async fn test_invite_member_authenticate_failure() {
        let service = service(InMemoryAdapter::new().failing("authenticate"));

        let err = service
            .invite_member(Some(&request()), new_invite("a@x.com", &[]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OperationError::Unexpected(UnexpectedError::Authentication { cause: Some(_), .. })
        ));
        let reported = service.adapter().reported();
        assert_eq!(reported.len(), 1);
        assert_eq!(
            reported[0].chain,
            vec![
                "Authentication failed in resolver of Mutation.cohortInviteMember".to_string(),
                "injected failure in `authenticate`".to_string(),
            ]
        );
        assert!(service.adapter().calls_to("authorize").is_empty());
    }

    #[tokio::test]
    async fn test_redeem_member_invite_failure() {
        let service = service(InMemoryAdapter::new().with_invite("i1", "a@x.com").failing("redeem_invite"));

        let err = service.redeem_member_invite(Some(&request()), "i1").await.unwrap_err();

        assert!(matches!(
            err,
            OperationError::Unexpected(UnexpectedError::RedeemInviteFailed { .. })
        ));
        assert_eq!(err.unexpected().unwrap().public_message(), "An unexpected error occurred");

        let adapter = service.adapter();
        assert_eq!(adapter.reported().len(), 1);
        assert_eq!(adapter.reported()[0].message, "Failed to redeem invite with ID `i1`");
        assert_eq!(adapter.invites().len(), 1);
        assert!(adapter.members().is_empty());
    }

    #[tokio::test]
    async fn test_list_invites_unauthorized() {
        let service = service(InMemoryAdapter::new().denying().with_invite("i1", "a@x.com"));

        let err = service.list_invites(Some(&request())).await.unwrap_err();

        assert_eq!(err.public_message(), "Missing permission(s) cohort:invite:read");
        assert_eq!(
            service.adapter().calls_to("authorize"),
            vec![vec!["test".to_string(), "cohort:invite:read".to_string()]]
        );
        assert!(service.adapter().calls_to("list_invites").is_empty());
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut ids = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        dedupe(&mut ids);
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
    }
}
