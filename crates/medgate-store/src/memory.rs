//! In-memory implementation of the Ledger trait.
//!
//! Same semantics as SQLite, no persistence. Used by tests and by
//! embedders that keep world state elsewhere.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Result, StoreError};
use crate::traits::Ledger;

/// In-memory world state.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<HashMap<String, Bytes>>,
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether `key` holds a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state
            .read()
            .map(|s| s.contains_key(key))
            .unwrap_or(false)
    }
}

fn poisoned<T>(key: &str) -> impl FnOnce(PoisonError<T>) -> StoreError + '_ {
    move |e| StoreError::Backend {
        key: key.to_owned(),
        reason: format!("lock poisoned: {}", e),
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        let state = self.state.read().map_err(poisoned(key))?;
        Ok(state.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        let mut state = self.state.write().map_err(poisoned(key))?;
        state.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_ledger_basic() {
        let ledger = MemoryLedger::new();

        assert!(ledger.get_state("patient42").await.unwrap().is_none());

        ledger
            .put_state("patient42", Bytes::from_static(b"[]"))
            .await
            .unwrap();

        let value = ledger.get_state("patient42").await.unwrap().unwrap();
        assert_eq!(&value[..], b"[]");
        assert!(ledger.contains_key("patient42"));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_ledger_put_replaces() {
        let ledger = MemoryLedger::new();

        ledger.put_state("k", Bytes::from_static(b"one")).await.unwrap();
        ledger.put_state("k", Bytes::from_static(b"two")).await.unwrap();

        let value = ledger.get_state("k").await.unwrap().unwrap();
        assert_eq!(&value[..], b"two");
        assert_eq!(ledger.len(), 1);
    }
}
