//! # MedGate
//!
//! A permissioned record-sharing gate over a key-value ledger. Patients
//! store lists of grants saying which doctor may view which test result over
//! which dates; doctors read back only the grants addressed to them.
//!
//! ## Operations
//!
//! - `init(configValue)` - store an opaque value under the system key
//! - `write(key, value)` - replace a patient's grant list, if the active
//!   [`WritePolicy`] admits the caller
//! - `read(key)` - return the caller's share of a grant list, or the system
//!   value unfiltered
//!
//! ## Usage
//!
//! ```rust,no_run
//! use medgate::{Chaincode, ChaincodeConfig, Stub};
//! use medgate::perms::StaticCredentials;
//! use medgate::store::MemoryLedger;
//!
//! async fn example() {
//!     let chaincode = Chaincode::new(ChaincodeConfig::default());
//!     let ledger = MemoryLedger::new();
//!
//!     let patient = StaticCredentials::user_with_role("alice", "Patient");
//!     let grants = r#"[{"doctorId":"doc1","testId":"t1","startDate":"2020-01-01","endDate":"2020-02-01"}]"#;
//!     chaincode
//!         .invoke(&Stub::new(&ledger, &patient), "write", &["patient42", grants])
//!         .await
//!         .unwrap();
//!
//!     let doctor = StaticCredentials::user("doc1");
//!     let visible = chaincode
//!         .query(&Stub::new(&ledger, &doctor), "read", &["patient42"])
//!         .await
//!         .unwrap();
//!     assert!(visible.is_some());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `medgate::core` - grant types and the stored-state codec
//! - `medgate::store` - the ledger trait and backends
//! - `medgate::perms` - identity, write policies, visibility

pub mod chaincode;
pub mod config;
pub mod error;
pub mod state;

pub use medgate_core as core;
pub use medgate_perms as perms;
pub use medgate_store as store;

pub use chaincode::{Chaincode, Operation, Stub};
pub use config::ChaincodeConfig;
pub use error::{ChaincodeError, ErrorKind, Result};
pub use state::StateAccessor;

pub use medgate_core::{AccessGrant, DoctorId, PatientRecord};
pub use medgate_perms::{Identity, WritePolicy};
