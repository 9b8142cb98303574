//! One pipeline per cohort mutation and query
//!
//! Pipelines run strictly in order: permissions first, then preconditions in
//! their declared order, then the adapter mutation. Role validation for new
//! invites is the only fan-out.

mod invites;
mod members;
mod roles;

/// Resolver names, used in diagnostics and span names
pub mod resolver {
    pub const INVITE_MEMBER: &str = "Mutation.cohortInviteMember";
    pub const REVOKE_MEMBER_INVITE: &str = "Mutation.cohortRevokeMemberInvite";
    pub const REDEEM_MEMBER_INVITE: &str = "Mutation.cohortRedeemMemberInvite";
    pub const RESEND_MEMBER_INVITE: &str = "Mutation.cohortResendMemberInvite";
    pub const MEMBER_ADD_ROLE: &str = "Mutation.cohortMemberAddRole";
    pub const MEMBER_REMOVE_ROLE: &str = "Mutation.cohortMemberRemoveRole";
    pub const DELETE_MEMBER: &str = "Mutation.cohortDeleteMember";

    pub const MEMBER_INVITES_COUNT: &str = "Query.cohortMemberInvitesCount";
    pub const MEMBER_INVITES: &str = "Query.cohortMemberInvites";
    pub const MEMBER: &str = "Query.cohortMember";
    pub const MEMBERS: &str = "Query.cohortMembers";
    pub const ROLES: &str = "Query.cohortRoles";
}
