//! Error types for the permissions module.

use thiserror::Error;

/// Failure reported by the credential collaborator itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CredentialError(pub String);

impl CredentialError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can occur during permission checks.
#[derive(Debug, Error)]
pub enum PermsError {
    /// A credential attribute could not be resolved.
    #[error("couldn't get attribute {attribute}: {cause}")]
    Identity { attribute: String, cause: String },

    /// Identity is not on the write allow-list.
    #[error("{identity} does not have access to write {key}")]
    NotPermitted { identity: String, key: String },

    /// Identity holds a role that may not write.
    #[error("{identity} with role {role} does not have access to write {key}")]
    RoleNotPermitted {
        identity: String,
        role: String,
        key: String,
    },

    /// Reader has no grant addressed to them under this key.
    #[error("access denied: no shared records of patient {key}")]
    AccessDenied { key: String },
}

impl PermsError {
    /// Whether this is a rejected write.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            PermsError::NotPermitted { .. } | PermsError::RoleNotPermitted { .. }
        )
    }
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
