//! Error taxonomy for cohort operations
//!
//! Two layers:
//!
//! - [`UnexpectedError`]: operational failures that are reported to the
//!   operator hook and only surfaced to callers through a generic
//!   [`public_message`](UnexpectedError::public_message).
//! - Domain errors (one closed enum per operation family): expected business
//!   rule violations that are surfaced with a precise reason and never
//!   reported.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::adapter::AdapterError;

/// Public message for every unexpected error that does not disclose details
pub const UNEXPECTED_PUBLIC_MESSAGE: &str = "An unexpected error occurred";

/// Failure that is not meaningful to expose to the caller in detail
#[derive(Error, Debug)]
pub enum UnexpectedError {
    #[error("Authentication failed in resolver of {resolver}")]
    Authentication {
        resolver: &'static str,
        #[source]
        cause: Option<AdapterError>,
    },

    #[error(
        "Authorisation failed in resolver of {resolver} with the requested permissions [{}]",
        .permissions.join(", ")
    )]
    Authorisation {
        resolver: &'static str,
        permissions: Vec<String>,
        #[source]
        cause: Option<AdapterError>,
    },

    #[error("Failed to send invite email out to `{email}` for invite ID `{invite_id}`")]
    SendInviteFailed {
        invite_id: String,
        email: String,
        #[source]
        cause: AdapterError,
    },

    #[error("Failed to revoke invite with ID `{invite_id}`")]
    RevokeInviteFailed {
        invite_id: String,
        #[source]
        cause: AdapterError,
    },

    #[error("Failed to redeem invite with ID `{invite_id}`")]
    RedeemInviteFailed {
        invite_id: String,
        #[source]
        cause: AdapterError,
    },

    #[error("Failed to resend invite with ID `{invite_id}`")]
    ResendInviteFailed {
        invite_id: String,
        #[source]
        cause: AdapterError,
    },

    #[error("Unexpected error in resolver of {resolver}")]
    Resolver {
        resolver: &'static str,
        #[source]
        cause: AdapterError,
    },
}

impl UnexpectedError {
    /// Wrap an arbitrary adapter failure raised inside `resolver`
    pub fn wrap(resolver: &'static str, cause: impl Into<AdapterError>) -> Self {
        Self::Resolver {
            resolver,
            cause: cause.into(),
        }
    }

    /// Message that is safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::Authorisation { permissions, .. } => {
                format!("Missing permission(s) {}", permissions.join(", "))
            }
            _ => UNEXPECTED_PUBLIC_MESSAGE.to_string(),
        }
    }

    /// Walk the full cause chain, outermost first, for diagnostics
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut source = StdError::source(self);
        while let Some(err) = source {
            messages.push(err.to_string());
            source = err.source();
        }
        messages
    }
}

/// Extension for mapping adapter results into [`UnexpectedError`]
pub(crate) trait UnexpectedExt<T> {
    fn or_unexpected(self, resolver: &'static str) -> Result<T, UnexpectedError>;
}

impl<T> UnexpectedExt<T> for Result<T, AdapterError> {
    fn or_unexpected(self, resolver: &'static str) -> Result<T, UnexpectedError> {
        self.map_err(|cause| UnexpectedError::wrap(resolver, cause))
    }
}

/// Error half of every mutation result
///
/// `Unexpected` errors have already been handed to the operator hook by the
/// time the caller sees them.
#[derive(Debug)]
pub enum OperationError<E> {
    Domain(E),
    Unexpected(UnexpectedError),
}

impl<E: fmt::Display> fmt::Display for OperationError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(err) => fmt::Display::fmt(err, f),
            Self::Unexpected(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> StdError for OperationError<E> {}

impl<E> OperationError<E> {
    pub fn domain(&self) -> Option<&E> {
        match self {
            Self::Domain(err) => Some(err),
            Self::Unexpected(_) => None,
        }
    }

    pub fn unexpected(&self) -> Option<&UnexpectedError> {
        match self {
            Self::Domain(_) => None,
            Self::Unexpected(err) => Some(err),
        }
    }
}

/// Failure inside a pipeline before it is funnelled into an [`OperationError`]
#[derive(Debug)]
pub(crate) enum Failure<E> {
    Domain(E),
    Unexpected(UnexpectedError),
}

impl<E> From<UnexpectedError> for Failure<E> {
    fn from(err: UnexpectedError) -> Self {
        Self::Unexpected(err)
    }
}

macro_rules! domain_failure {
    ($($family:ty),+ $(,)?) => {
        $(
            impl From<$family> for Failure<$family> {
                fn from(err: $family) -> Self {
                    Self::Domain(err)
                }
            }
        )+
    };
}

domain_failure!(
    InviteMemberError,
    RevokeMemberInviteError,
    RedeemMemberInviteError,
    ResendMemberInviteError,
    RoleChangeError,
    MemberDeleteError,
);

/// Why an invite could not be created
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InviteMemberError {
    #[error("Role not found with ID `{role_id}`")]
    UnknownRole { role_id: String },

    #[error("A member with the email `{email}` has already been invited")]
    AlreadyInvited { email: String },

    #[error("A member with the email `{email}` has already signed up")]
    AlreadyMember { email: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevokeMemberInviteError {
    #[error("Member invite with ID `{invite_id}` could not be found to revoke")]
    InviteNotFound { invite_id: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedeemMemberInviteError {
    #[error("Member invite with ID `{invite_id}` could not be found to redeem")]
    InviteNotFound { invite_id: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResendMemberInviteError {
    #[error("Member invite with ID `{invite_id}` could not be found to resend")]
    InviteNotFound { invite_id: String },
}

/// Why a role could not be added to or removed from a member
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleChangeError {
    #[error("Role not found with ID `{role_id}`")]
    UnknownRole { role_id: String },

    #[error("A member with the ID `{member_id}` could not be found")]
    MemberNotFound { member_id: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemberDeleteError {
    #[error("A member with the ID `{member_id}` could not be found")]
    MemberNotFound { member_id: String },
}
