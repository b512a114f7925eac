//! Write policies.
//!
//! A patient's grant list is only ever replaced as a whole, and only by an
//! identity the active policy admits. One policy is active per deployment.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{PermsError, Result};
use crate::identity::Identity;

/// Role allowed to write under the default policy.
pub const PATIENT_ROLE: &str = "Patient";

/// Usernames admitted by the legacy allow-list deployment.
pub const LEGACY_WRITERS: [&str; 2] = ["user_type1_0", "user_type1_1"];

/// Decides whether an identity may replace a grant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WritePolicy {
    /// Role-free: only these usernames may write.
    AllowList { usernames: BTreeSet<String> },

    /// Role-based: only callers holding exactly this role may write.
    RequireRole { role: String },
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self::require_role(PATIENT_ROLE)
    }
}

impl WritePolicy {
    /// Admit exactly the given usernames.
    pub fn allow_list<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllowList {
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }

    /// Admit callers whose role equals `role`.
    pub fn require_role(role: impl Into<String>) -> Self {
        Self::RequireRole { role: role.into() }
    }

    /// The allow-list used by the original role-free deployment.
    pub fn legacy_allow_list() -> Self {
        Self::allow_list(LEGACY_WRITERS)
    }

    /// Check that `identity` may write `key`.
    ///
    /// Comparison is exact: no case folding, no trimming.
    pub fn authorize(&self, identity: &Identity, key: &str) -> Result<()> {
        match self {
            WritePolicy::AllowList { usernames } => {
                let admitted = identity
                    .username()
                    .map(|u| usernames.contains(u))
                    .unwrap_or(false);
                if admitted {
                    return Ok(());
                }
                tracing::warn!(
                    identity = identity.display_name(),
                    key,
                    "write rejected by allow-list"
                );
                Err(PermsError::NotPermitted {
                    identity: identity.display_name().to_string(),
                    key: key.to_string(),
                })
            }
            WritePolicy::RequireRole { role } => {
                if identity.role() == Some(role.as_str()) {
                    return Ok(());
                }
                let held = identity.role().unwrap_or("<none>");
                tracing::warn!(
                    identity = identity.display_name(),
                    role = held,
                    key,
                    "write rejected by role policy"
                );
                Err(PermsError::RoleNotPermitted {
                    identity: identity.display_name().to_string(),
                    role: held.to_string(),
                    key: key.to_string(),
                })
            }
        }
    }
}
