//! Mutation result unions
//!
//! Every mutation resolves to a union of its success object and an error
//! object carrying `{reason, message}`. Domain failures keep their own reason
//! and message; unexpected failures become `UNEXPECTED` with the public
//! message only, since the full chain has already gone to the operator hook.

use std::fmt;

use async_graphql::{Enum, SimpleObject, Union};
use serde::Serialize;

use crate::errors::{
    InviteMemberError, MemberDeleteError, OperationError, RedeemMemberInviteError,
    ResendMemberInviteError, RevokeMemberInviteError, RoleChangeError,
};
use crate::service::OperationResult;
use crate::types::{Invite, MemberRecord, RoleChange, RoleRecord};

use super::objects::{
    CohortMember, CohortMemberDelete, CohortMemberInvite, CohortMemberRoleChange,
    CohortRedeemMemberInvite,
};

/// Domain error family with a GraphQL reason enum
pub trait ErrorReason: fmt::Display {
    type Reason: Copy;

    /// Reason used for anything outside the family
    const UNEXPECTED: Self::Reason;

    fn reason(&self) -> Self::Reason;
}

/// Reason and message for the wire
pub fn error_parts<E: ErrorReason>(err: &OperationError<E>) -> (E::Reason, String) {
    match err {
        OperationError::Domain(err) => (err.reason(), err.to_string()),
        OperationError::Unexpected(err) => (E::UNEXPECTED, err.public_message()),
    }
}

// Invite

/// Reason why the invite creation failed
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CohortInviteMemberErrorReason {
    /// There is already a pending invite for given email
    AlreadyInvited,
    /// There is already a member signed up with given email
    AlreadyMember,
    /// One or more of the role IDs are invalid
    UnknownRole,
    /// An unexpected error occurred
    Unexpected,
}

impl ErrorReason for InviteMemberError {
    type Reason = CohortInviteMemberErrorReason;
    const UNEXPECTED: Self::Reason = CohortInviteMemberErrorReason::Unexpected;

    fn reason(&self) -> Self::Reason {
        match self {
            Self::AlreadyInvited { .. } => CohortInviteMemberErrorReason::AlreadyInvited,
            Self::AlreadyMember { .. } => CohortInviteMemberErrorReason::AlreadyMember,
            Self::UnknownRole { .. } => CohortInviteMemberErrorReason::UnknownRole,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortInviteMemberError {
    /// Reason why the invite was not created
    pub reason: CohortInviteMemberErrorReason,
    /// Message possibly elaborating on the reason
    pub message: String,
}

#[derive(Union, Debug, Clone)]
pub enum CohortMemberInviteResult {
    CohortMemberInvite(CohortMemberInvite),
    CohortInviteMemberError(CohortInviteMemberError),
}

impl CohortMemberInviteResult {
    pub fn from_outcome<M: Serialize>(outcome: OperationResult<Invite<M>, InviteMemberError>) -> Self {
        match outcome {
            Ok(invite) => Self::CohortMemberInvite(CohortMemberInvite::from_invite(&invite)),
            Err(err) => {
                let (reason, message) = error_parts(&err);
                Self::CohortInviteMemberError(CohortInviteMemberError { reason, message })
            }
        }
    }
}

// Revoke

/// Reason why the invite was not revoked
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CohortRevokeMemberInviteErrorReason {
    /// Invite with given ID was not found. This could mean that the invite was already accepted,
    /// already revoked, or never existed in the first place.
    InviteNotFound,
    /// An unexpected error occurred
    Unexpected,
}

impl ErrorReason for RevokeMemberInviteError {
    type Reason = CohortRevokeMemberInviteErrorReason;
    const UNEXPECTED: Self::Reason = CohortRevokeMemberInviteErrorReason::Unexpected;

    fn reason(&self) -> Self::Reason {
        match self {
            Self::InviteNotFound { .. } => CohortRevokeMemberInviteErrorReason::InviteNotFound,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortRevokeMemberInviteError {
    /// Reason why the invite was not revoked
    pub reason: CohortRevokeMemberInviteErrorReason,
    /// Message possibly elaborating on the reason
    pub message: String,
}

#[derive(Union, Debug, Clone)]
pub enum CohortRevokeMemberInviteResult {
    CohortMemberInvite(CohortMemberInvite),
    CohortRevokeMemberInviteError(CohortRevokeMemberInviteError),
}

impl CohortRevokeMemberInviteResult {
    pub fn from_outcome<M: Serialize>(
        outcome: OperationResult<Invite<M>, RevokeMemberInviteError>,
    ) -> Self {
        match outcome {
            Ok(invite) => Self::CohortMemberInvite(CohortMemberInvite::from_invite(&invite)),
            Err(err) => {
                let (reason, message) = error_parts(&err);
                Self::CohortRevokeMemberInviteError(CohortRevokeMemberInviteError { reason, message })
            }
        }
    }
}

// Redeem

#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CohortRedeemMemberInviteErrorReason {
    /// Invite with given ID was not found
    InviteNotFound,
    /// An unexpected error occurred
    Unexpected,
}

impl ErrorReason for RedeemMemberInviteError {
    type Reason = CohortRedeemMemberInviteErrorReason;
    const UNEXPECTED: Self::Reason = CohortRedeemMemberInviteErrorReason::Unexpected;

    fn reason(&self) -> Self::Reason {
        match self {
            Self::InviteNotFound { .. } => CohortRedeemMemberInviteErrorReason::InviteNotFound,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortRedeemMemberInviteError {
    pub reason: CohortRedeemMemberInviteErrorReason,
    pub message: String,
}

#[derive(Union, Debug, Clone)]
pub enum CohortRedeemMemberInviteResult {
    CohortRedeemMemberInvite(CohortRedeemMemberInvite),
    CohortRedeemMemberInviteError(CohortRedeemMemberInviteError),
}

impl CohortRedeemMemberInviteResult {
    pub fn from_outcome<M: MemberRecord>(outcome: OperationResult<M, RedeemMemberInviteError>) -> Self {
        match outcome {
            Ok(member) => Self::CohortRedeemMemberInvite(CohortRedeemMemberInvite {
                member: CohortMember::from_record(&member),
            }),
            Err(err) => {
                let (reason, message) = error_parts(&err);
                Self::CohortRedeemMemberInviteError(CohortRedeemMemberInviteError { reason, message })
            }
        }
    }
}

// Resend

#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CohortResendMemberInviteErrorReason {
    /// Invite with given ID was not found
    InviteNotFound,
    /// An unexpected error occurred
    Unexpected,
}

impl ErrorReason for ResendMemberInviteError {
    type Reason = CohortResendMemberInviteErrorReason;
    const UNEXPECTED: Self::Reason = CohortResendMemberInviteErrorReason::Unexpected;

    fn reason(&self) -> Self::Reason {
        match self {
            Self::InviteNotFound { .. } => CohortResendMemberInviteErrorReason::InviteNotFound,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortResendMemberInviteError {
    pub reason: CohortResendMemberInviteErrorReason,
    pub message: String,
}

#[derive(Union, Debug, Clone)]
pub enum CohortResendMemberInviteResult {
    CohortMemberInvite(CohortMemberInvite),
    CohortResendMemberInviteError(CohortResendMemberInviteError),
}

impl CohortResendMemberInviteResult {
    pub fn from_outcome<M: Serialize>(
        outcome: OperationResult<Invite<M>, ResendMemberInviteError>,
    ) -> Self {
        match outcome {
            Ok(invite) => Self::CohortMemberInvite(CohortMemberInvite::from_invite(&invite)),
            Err(err) => {
                let (reason, message) = error_parts(&err);
                Self::CohortResendMemberInviteError(CohortResendMemberInviteError { reason, message })
            }
        }
    }
}

// Role change

#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CohortMemberRoleChangeErrorReason {
    /// Member with given ID was not found
    MemberNotFound,
    /// Role not found with the given id
    UnknownRole,
    /// An unexpected error occurred
    Unexpected,
}

impl ErrorReason for RoleChangeError {
    type Reason = CohortMemberRoleChangeErrorReason;
    const UNEXPECTED: Self::Reason = CohortMemberRoleChangeErrorReason::Unexpected;

    fn reason(&self) -> Self::Reason {
        match self {
            Self::MemberNotFound { .. } => CohortMemberRoleChangeErrorReason::MemberNotFound,
            Self::UnknownRole { .. } => CohortMemberRoleChangeErrorReason::UnknownRole,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMemberRoleChangeError {
    /// Reason why the role change failed
    pub reason: CohortMemberRoleChangeErrorReason,
    /// Message possibly elaborating on the reason
    pub message: String,
}

#[derive(Union, Debug, Clone)]
pub enum CohortMemberRoleChangeResult {
    CohortMemberRoleChange(CohortMemberRoleChange),
    CohortMemberRoleChangeError(CohortMemberRoleChangeError),
}

impl CohortMemberRoleChangeResult {
    pub fn from_outcome<R: RoleRecord>(outcome: OperationResult<RoleChange<R>, RoleChangeError>) -> Self {
        match outcome {
            Ok(change) => Self::CohortMemberRoleChange(CohortMemberRoleChange::from_change(&change)),
            Err(err) => {
                let (reason, message) = error_parts(&err);
                Self::CohortMemberRoleChangeError(CohortMemberRoleChangeError { reason, message })
            }
        }
    }
}

// Delete

#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CohortMemberDeleteErrorReason {
    /// Member with given ID was not found
    MemberNotFound,
    /// An unexpected error occurred
    Unexpected,
}

impl ErrorReason for MemberDeleteError {
    type Reason = CohortMemberDeleteErrorReason;
    const UNEXPECTED: Self::Reason = CohortMemberDeleteErrorReason::Unexpected;

    fn reason(&self) -> Self::Reason {
        match self {
            Self::MemberNotFound { .. } => CohortMemberDeleteErrorReason::MemberNotFound,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CohortMemberDeleteError {
    pub reason: CohortMemberDeleteErrorReason,
    pub message: String,
}

#[derive(Union, Debug, Clone)]
pub enum CohortMemberDeleteResult {
    CohortMemberDelete(CohortMemberDelete),
    CohortMemberDeleteError(CohortMemberDeleteError),
}

impl CohortMemberDeleteResult {
    pub fn from_outcome<M: MemberRecord>(outcome: OperationResult<M, MemberDeleteError>) -> Self {
        match outcome {
            Ok(member) => Self::CohortMemberDelete(CohortMemberDelete {
                member: CohortMember::from_record(&member),
            }),
            Err(err) => {
                let (reason, message) = error_parts(&err);
                Self::CohortMemberDeleteError(CohortMemberDeleteError { reason, message })
            }
        }
    }
}
