//! Identity resolution.
//!
//! The ledger runtime verifies the caller's certificate and exposes its
//! attributes. Each attribute is read once per invocation through a
//! [`CredentialSource`]; nothing is cached between invocations.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{CredentialError, PermsError, Result};
use crate::policy::WritePolicy;

/// Read access to the verified attributes of the current caller.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Read the raw value of attribute `name`.
    ///
    /// Returns `None` if the credential carries no such attribute.
    async fn read_cert_attribute(
        &self,
        name: &str,
    ) -> std::result::Result<Option<Bytes>, CredentialError>;
}

/// Names of the credential attributes MedGate reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeNames {
    pub username: String,
    pub role: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            username: "username".to_string(),
            role: "role".to_string(),
        }
    }
}

/// Resolve a required attribute.
///
/// Fails if the attribute is absent, empty, not UTF-8, or the lookup itself
/// fails. The error names the attribute and the cause.
pub async fn resolve_attribute<C>(source: &C, name: &str) -> Result<String>
where
    C: CredentialSource + ?Sized,
{
    resolve_optional(source, name)
        .await?
        .ok_or_else(|| PermsError::Identity {
            attribute: name.to_string(),
            cause: "attribute not present in credential".to_string(),
        })
}

/// Resolve an attribute that may legitimately be missing.
///
/// Absence yields `Ok(None)`; a failed lookup or a malformed value is still
/// an error.
pub async fn resolve_optional<C>(source: &C, name: &str) -> Result<Option<String>>
where
    C: CredentialSource + ?Sized,
{
    let identity_error = |cause: String| PermsError::Identity {
        attribute: name.to_string(),
        cause,
    };

    let raw = match source.read_cert_attribute(name).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(e) => return Err(identity_error(e.to_string())),
    };

    let value = String::from_utf8(raw.to_vec())
        .map_err(|e| identity_error(format!("attribute is not valid UTF-8: {}", e)))?;

    if value.is_empty() {
        return Err(identity_error("attribute is empty".to_string()));
    }

    Ok(Some(value))
}

/// The caller's resolved attributes for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    username: Option<String>,
    role: Option<String>,
}

impl Identity {
    /// An identity with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Name used in error messages and logs.
    pub fn display_name(&self) -> &str {
        self.username().unwrap_or("<unnamed>")
    }

    /// Resolve the attributes a reader needs: the username is required.
    pub async fn resolve_for_read<C>(source: &C, names: &AttributeNames) -> Result<Self>
    where
        C: CredentialSource + ?Sized,
    {
        let username = resolve_attribute(source, &names.username).await?;
        Ok(Self::new().with_username(username))
    }

    /// Resolve the attributes `policy` decides on.
    ///
    /// An allow-list needs the username. A role policy needs the role; the
    /// username is read if present so rejections can name the caller.
    pub async fn resolve_for_write<C>(
        source: &C,
        names: &AttributeNames,
        policy: &WritePolicy,
    ) -> Result<Self>
    where
        C: CredentialSource + ?Sized,
    {
        match policy {
            WritePolicy::AllowList { .. } => {
                let username = resolve_attribute(source, &names.username).await?;
                Ok(Self::new().with_username(username))
            }
            WritePolicy::RequireRole { .. } => {
                let username = resolve_optional(source, &names.username).await?;
                let role = resolve_attribute(source, &names.role).await?;
                Ok(Self {
                    username,
                    role: Some(role),
                })
            }
        }
    }
}

/// A fixed set of credential attributes.
///
/// Stands in for the runtime's certificate lookup when embedding MedGate or
/// testing it.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    attributes: HashMap<String, Bytes>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Bytes>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Credentials carrying only a username.
    pub fn user(username: &str) -> Self {
        Self::new().with_attribute("username", username.as_bytes().to_vec())
    }

    /// Credentials carrying a username and a role.
    pub fn user_with_role(username: &str, role: &str) -> Self {
        Self::user(username).with_attribute("role", role.as_bytes().to_vec())
    }
}

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn read_cert_attribute(
        &self,
        name: &str,
    ) -> std::result::Result<Option<Bytes>, CredentialError> {
        Ok(self.attributes.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    #[async_trait]
    impl CredentialSource for Unreachable {
        async fn read_cert_attribute(
            &self,
            _name: &str,
        ) -> std::result::Result<Option<Bytes>, CredentialError> {
            Err(CredentialError::new("certificate store unavailable"))
        }
    }

    #[tokio::test]
    async fn test_resolve_present_attribute() {
        let creds = StaticCredentials::user("doc1");
        let username = resolve_attribute(&creds, "username").await.unwrap();
        assert_eq!(username, "doc1");
    }

    #[tokio::test]
    async fn test_resolve_absent_attribute_names_it() {
        let creds = StaticCredentials::user("doc1");
        let err = resolve_attribute(&creds, "role").await.unwrap_err();

        match &err {
            PermsError::Identity { attribute, .. } => assert_eq!(attribute, "role"),
            other => panic!("expected Identity, got {:?}", other),
        }
        assert!(err.to_string().contains("role"));
    }

    #[tokio::test]
    async fn test_resolve_runtime_failure_carries_cause() {
        let err = resolve_attribute(&Unreachable, "username").await.unwrap_err();
        let message = err.to_string();

        assert!(message.contains("username"));
        assert!(message.contains("certificate store unavailable"));
    }

    #[tokio::test]
    async fn test_resolve_optional_still_fails_on_runtime_error() {
        assert!(resolve_optional(&Unreachable, "username").await.is_err());
        assert_eq!(
            resolve_optional(&StaticCredentials::new(), "username")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_resolve_rejects_malformed_values() {
        let creds = StaticCredentials::new()
            .with_attribute("username", vec![0xffu8, 0xfe])
            .with_attribute("role", Vec::<u8>::new());

        assert!(resolve_attribute(&creds, "username").await.is_err());
        assert!(resolve_attribute(&creds, "role").await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_for_write_role_policy_tolerates_missing_username() {
        let creds = StaticCredentials::new().with_attribute("role", "Doctor");
        let identity = Identity::resolve_for_write(
            &creds,
            &AttributeNames::default(),
            &WritePolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(identity.username(), None);
        assert_eq!(identity.role(), Some("Doctor"));
    }

    #[tokio::test]
    async fn test_resolve_for_write_allow_list_requires_username() {
        let creds = StaticCredentials::new().with_attribute("role", "Patient");
        let result = Identity::resolve_for_write(
            &creds,
            &AttributeNames::default(),
            &WritePolicy::legacy_allow_list(),
        )
        .await;

        assert!(matches!(result, Err(PermsError::Identity { .. })));
    }

    #[tokio::test]
    async fn test_custom_attribute_names() {
        let creds = StaticCredentials::new().with_attribute("uid", "doc9");
        let names = AttributeNames {
            username: "uid".to_string(),
            ..AttributeNames::default()
        };

        let identity = Identity::resolve_for_read(&creds, &names).await.unwrap();
        assert_eq!(identity.username(), Some("doc9"));
    }
}
