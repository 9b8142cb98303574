//! Configuration for the cohort service
//!
//! ```rust
//! use cohort_management::config::{CohortConfig, ResendInvitePolicy};
//!
//! // Latest behavior: anyone may ask for an invite to be resent
//! let config = CohortConfig::default();
//! assert_eq!(config.resend_invite, ResendInvitePolicy::SelfService);
//!
//! // Gate resending behind the invite.create permission
//! let config = CohortConfig::strict();
//! assert_eq!(config.resend_invite, ResendInvitePolicy::RequireInviteCreate);
//! ```

use serde::Deserialize;

/// Who may resend an invite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResendInvitePolicy {
    /// No permission check; knowing the invite ID is enough
    #[default]
    SelfService,

    /// Require the `invite.create` permission slot
    RequireInviteCreate,
}

/// Service-wide settings
///
/// Deserializable so hosts can keep it next to their own configuration:
///
/// ```toml
/// [cohort]
/// resend_invite = "require_invite_create"
/// dedupe_role_ids = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    pub resend_invite: ResendInvitePolicy,

    /// Drop repeated role IDs from invite requests (first occurrence wins)
    pub dedupe_role_ids: bool,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self::self_service()
    }
}

impl CohortConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resending needs no permission
    pub fn self_service() -> Self {
        Self {
            resend_invite: ResendInvitePolicy::SelfService,
            dedupe_role_ids: true,
        }
    }

    /// Every mutation except redemption requires a permission
    pub fn strict() -> Self {
        Self {
            resend_invite: ResendInvitePolicy::RequireInviteCreate,
            dedupe_role_ids: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_config() {
        let config: CohortConfig =
            serde_json::from_value(serde_json::json!({"resend_invite": "require_invite_create"}))
                .unwrap();

        assert_eq!(config.resend_invite, ResendInvitePolicy::RequireInviteCreate);
        assert!(config.dedupe_role_ids);
    }

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: CohortConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config, CohortConfig::default());
    }
}
