//! # MedGate Testkit
//!
//! Testing utilities for MedGate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a chaincode wired to an in-memory ledger, with helpers
//!   for acting as a patient or a doctor
//! - **Failing collaborators**: a ledger and a credential source that always
//!   error, for exercising error propagation
//! - **Generators**: proptest strategies for grants and grant lists
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use medgate_testkit::fixtures::TestFixture;
//! use medgate_core::AccessGrant;
//!
//! async fn example() {
//!     let fixture = TestFixture::new();
//!     fixture
//!         .write_as_patient("patient42", &[AccessGrant::new("doc1", "t1", "a", "b")])
//!         .await
//!         .unwrap();
//!     let grants = fixture.read_grants_as("doc1", "patient42").await.unwrap();
//!     assert_eq!(grants.len(), 1);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use medgate_testkit::generators::grant_list;
//!
//! proptest! {
//!     #[test]
//!     fn grant_lists_encode(grants in grant_list(16)) {
//!         prop_assert!(medgate_core::encode_grants(&grants).is_ok());
//!     }
//! }
//! ```

pub mod failing;
pub mod fixtures;
pub mod generators;

pub use failing::{FailingCredentials, FailingLedger};
pub use fixtures::{grants_json, TestFixture, SAMPLE_PATIENT};
pub use generators::{access_grant, doctor_id, grant_list, GrantListParams};
