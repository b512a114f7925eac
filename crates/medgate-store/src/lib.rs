//! # MedGate Store
//!
//! The world-state abstraction MedGate reads and writes through. The ledger
//! runtime owns persistence; this crate only fixes the interface the handler
//! consumes and supplies two backends for embedding and testing.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The async trait for `get_state` / `put_state`
//! - [`MemoryLedger`] - In-memory world state
//! - [`SqliteLedger`] - SQLite-backed world state
//!
//! ## Usage
//!
//! ```rust,no_run
//! use medgate_store::{Ledger, MemoryLedger};
//!
//! async fn example() {
//!     let ledger = MemoryLedger::new();
//!     ledger.put_state("patient42", b"[]".to_vec().into()).await.unwrap();
//!     let value = ledger.get_state("patient42").await.unwrap();
//!     assert!(value.is_some());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Full replace**: `put_state` overwrites whatever the key held
//! - **Absence is not an error** at this layer: `get_state` returns `None`
//! - **No deletes**: world-state keys are never removed

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;
pub use traits::Ledger;
