//! Cohort data model and common GraphQL scalars

use std::fmt;
use std::sync::LazyLock;

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Maximum length of an address, per RFC 5321.
const MAX_EMAIL_LEN: usize = 254;

/// Why an email address was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email is too long (max {MAX_EMAIL_LEN} octets)")]
    TooLong,

    #[error("Invalid email format")]
    InvalidFormat,
}

/// Validated email address scalar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an email address
    pub fn parse(value: impl Into<String>) -> Result<Self, EmailError> {
        let value = value.into();

        if value.is_empty() {
            return Err(EmailError::Empty);
        }
        if value.len() > MAX_EMAIL_LEN {
            return Err(EmailError::TooLong);
        }
        if !EMAIL_REGEX.is_match(&value) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value))
    }

    /// Wrap an address that was validated before it was stored
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[Scalar]
impl ScalarType for EmailAddress {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(s) = value {
            EmailAddress::parse(s).map_err(InputValueError::custom)
        } else {
            Err(InputValueError::expected_type(value))
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

/// A pending offer to join the cohort
///
/// `metadata` is the consumer-defined payload stored alongside the invite and
/// handed to the member once the invite is redeemed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite<M> {
    pub id: String,
    pub email: String,
    #[serde(rename = "roleIDs", default)]
    pub role_ids: Vec<String>,
    pub metadata: M,
}

/// Invite as requested by the caller, before the adapter assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvite<M> {
    pub email: EmailAddress,
    pub role_ids: Vec<String>,
    pub metadata: M,
}

/// Role that was added to or removed from a member
#[derive(Debug, Clone, PartialEq)]
pub struct RoleChange<R> {
    pub member_id: String,
    pub role: R,
}

/// A cohort member as stored by the adapter
///
/// The serialized form is exposed verbatim through the GraphQL `attributes`
/// field, so consumers decide what is visible.
pub trait MemberRecord: Serialize + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// A role that can be assigned to members
pub trait RoleRecord: Serialize + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(EmailAddress::parse("user@example.com").is_ok());
        assert!(EmailAddress::parse("user.name+tag@sub.example.co.uk").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(EmailAddress::parse("").unwrap_err(), EmailError::Empty);
        assert_eq!(EmailAddress::parse("notanemail").unwrap_err(), EmailError::InvalidFormat);
        assert_eq!(EmailAddress::parse("missing@domain").unwrap_err(), EmailError::InvalidFormat);

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(EmailAddress::parse(long).unwrap_err(), EmailError::TooLong);
    }

    #[test]
    fn test_length_limit_counts_octets() {
        // 137 characters, 262 octets
        let wide = format!("{}@example.com", "é".repeat(125));
        let err = EmailAddress::parse(wide).unwrap_err();

        assert_eq!(err, EmailError::TooLong);
        assert_eq!(err.to_string(), "Email is too long (max 254 octets)");
    }

    #[test]
    fn test_email_scalar_rejects_non_strings() {
        let parsed = <EmailAddress as ScalarType>::parse(Value::Number(42.into()));
        assert!(parsed.is_err());

        let parsed = <EmailAddress as ScalarType>::parse(Value::String("a@x.com".into())).unwrap();
        assert_eq!(parsed.to_value(), Value::String("a@x.com".into()));
    }

    #[test]
    fn test_invite_wire_shape() {
        let invite = Invite {
            id: "i1".to_string(),
            email: "a@x.com".to_string(),
            role_ids: vec!["r1".to_string()],
            metadata: serde_json::json!({}),
        };

        assert_eq!(
            serde_json::to_value(&invite).unwrap(),
            serde_json::json!({"id": "i1", "email": "a@x.com", "roleIDs": ["r1"], "metadata": {}})
        );
    }
}
