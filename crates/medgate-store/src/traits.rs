//! Ledger trait: the world-state interface the handler consumes.
//!
//! The ledger runtime serializes calls within a transaction. Implementations
//! only need to guard their own internal state.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Key-value world state.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Get the raw value stored under `key`.
    ///
    /// Returns `None` if the key has never been written.
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put_state(&self, key: &str, value: Bytes) -> Result<()>;
}
