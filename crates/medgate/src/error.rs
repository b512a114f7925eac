//! Error types for the chaincode.

use medgate_core::CoreError;
use medgate_perms::PermsError;
use medgate_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can end an invocation.
///
/// Every error is terminal: nothing has been written when one is returned.
#[derive(Debug, Error)]
pub enum ChaincodeError {
    /// Wrong number of arguments for the operation.
    #[error("incorrect number of arguments for {operation}: expecting {expected}, got {got}")]
    ArgumentCount {
        operation: &'static str,
        expected: usize,
        got: usize,
    },

    /// Operation name not served by this entry point.
    #[error("received unknown function {entry}: {name}")]
    UnknownOperation { entry: &'static str, name: String },

    /// World-state access failed; the backend's message is passed through.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Identity, authorization or visibility check failed.
    #[error(transparent)]
    Permission(#[from] PermsError),

    /// Stored or submitted bytes are not a grant list.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Coarse classification of a [`ChaincodeError`], stable across message
/// wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ArgumentCount,
    Identity,
    Authorization,
    AccessDenied,
    NotFound,
    Store,
    CorruptState,
    UnknownOperation,
}

impl ChaincodeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChaincodeError::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            ChaincodeError::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            ChaincodeError::Store(StoreError::NotFound(_)) => ErrorKind::NotFound,
            ChaincodeError::Store(_) => ErrorKind::Store,
            ChaincodeError::Permission(e) => match e {
                PermsError::Identity { .. } => ErrorKind::Identity,
                PermsError::NotPermitted { .. } | PermsError::RoleNotPermitted { .. } => {
                    ErrorKind::Authorization
                }
                PermsError::AccessDenied { .. } => ErrorKind::AccessDenied,
            },
            ChaincodeError::Core(_) => ErrorKind::CorruptState,
        }
    }

    /// Render the error as the JSON body handed back to the runtime.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        })
        .to_string()
    }
}

/// Result type for chaincode operations.
pub type Result<T> = std::result::Result<T, ChaincodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let not_found = ChaincodeError::from(StoreError::NotFound("patient42".into()));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let backend = ChaincodeError::from(StoreError::Backend {
            key: "patient42".into(),
            reason: "disk on fire".into(),
        });
        assert_eq!(backend.kind(), ErrorKind::Store);

        let denied = ChaincodeError::from(PermsError::AccessDenied {
            key: "patient42".into(),
        });
        assert_eq!(denied.kind(), ErrorKind::AccessDenied);

        let corrupt = ChaincodeError::from(CoreError::CorruptState {
            key: "patient42".into(),
            reason: "EOF".into(),
        });
        assert_eq!(corrupt.kind(), ErrorKind::CorruptState);
    }

    #[test]
    fn test_store_message_passes_through() {
        let err = ChaincodeError::from(StoreError::Backend {
            key: "patient42".into(),
            reason: "disk on fire".into(),
        });
        assert_eq!(
            err.to_string(),
            "failed to access state for key patient42: disk on fire"
        );
    }

    #[test]
    fn test_json_body() {
        let err = ChaincodeError::UnknownOperation {
            entry: "invoke",
            name: "delete".into(),
        };
        let body: serde_json::Value = serde_json::from_str(&err.to_json()).unwrap();

        assert_eq!(body["kind"], "unknown_operation");
        assert_eq!(body["error"], "received unknown function invoke: delete");
    }
}
