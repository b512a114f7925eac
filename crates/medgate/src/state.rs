//! State accessor: the only place raw world-state bytes are handled.
//!
//! Reads surface absence as [`StoreError::NotFound`]. Decoding is always
//! checked before a record is handed on.

use bytes::Bytes;
use medgate_core::{decode_grants, encode_grants, AccessGrant, PatientRecord};
use medgate_store::{Ledger, StoreError};

use crate::error::Result;

/// Typed access to one ledger for the duration of an invocation.
pub struct StateAccessor<'a, L: Ledger + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: Ledger + ?Sized> StateAccessor<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Raw bytes under `key`.
    pub async fn get(&self, key: &str) -> std::result::Result<Bytes, StoreError> {
        tracing::debug!(key, "get state");
        self.ledger
            .get_state(key)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Store `value` under `key` unconditionally.
    pub async fn put(&self, key: &str, value: Bytes) -> std::result::Result<(), StoreError> {
        tracing::debug!(key, len = value.len(), "put state");
        self.ledger.put_state(key, value).await
    }

    /// Decode `bytes` as the record stored under `key`.
    pub fn decode(&self, key: &str, bytes: &[u8]) -> Result<PatientRecord> {
        Ok(PatientRecord::decode(key, bytes)?)
    }

    /// Encode a grant list to its stored form.
    pub fn encode(&self, grants: &[AccessGrant]) -> Result<Bytes> {
        Ok(Bytes::from(encode_grants(grants)?))
    }

    /// Check that `bytes` would decode as a grant list for `key`.
    pub fn validate(&self, key: &str, bytes: &[u8]) -> Result<()> {
        decode_grants(key, bytes)?;
        Ok(())
    }

    /// Load and decode the record under `key`.
    pub async fn load_record(&self, key: &str) -> Result<PatientRecord> {
        let bytes = self.get(key).await?;
        self.decode(key, &bytes)
    }
}
