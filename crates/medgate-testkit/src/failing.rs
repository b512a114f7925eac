//! Collaborators that always fail.

use async_trait::async_trait;
use bytes::Bytes;
use medgate_perms::{CredentialError, CredentialSource};
use medgate_store::{Ledger, Result, StoreError};

/// A ledger whose every call fails with a backend error.
#[derive(Debug, Clone)]
pub struct FailingLedger {
    reason: String,
}

impl FailingLedger {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self, key: &str) -> StoreError {
        StoreError::Backend {
            key: key.to_string(),
            reason: self.reason.clone(),
        }
    }
}

#[async_trait]
impl Ledger for FailingLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        Err(self.error(key))
    }

    async fn put_state(&self, key: &str, _value: Bytes) -> Result<()> {
        Err(self.error(key))
    }
}

/// A credential source whose every lookup fails.
#[derive(Debug, Clone)]
pub struct FailingCredentials {
    reason: String,
}

impl FailingCredentials {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CredentialSource for FailingCredentials {
    async fn read_cert_attribute(
        &self,
        _name: &str,
    ) -> std::result::Result<Option<Bytes>, CredentialError> {
        Err(CredentialError::new(self.reason.clone()))
    }
}
