//! # MedGate Permissions
//!
//! Who may write a patient's grant list, and which grants a reader may see.
//!
//! ## Overview
//!
//! - **Identity**: the caller's verified attributes, read from their
//!   credential once per invocation through a [`CredentialSource`]
//! - **Write policy**: exactly one [`WritePolicy`] is active per deployment,
//!   either a fixed allow-list of usernames or a required role
//! - **Visibility**: a reader sees only the grants addressed to their
//!   username, in stored order; seeing none is an explicit denial
//!
//! ## Usage
//!
//! ```rust
//! use medgate_core::{AccessGrant, PatientRecord};
//! use medgate_perms::{visible_to, Identity, WritePolicy};
//!
//! let writer = Identity::new().with_username("alice").with_role("Patient");
//! WritePolicy::default().authorize(&writer, "patient42").unwrap();
//!
//! let record = PatientRecord::new(
//!     "patient42",
//!     vec![AccessGrant::new("doc1", "t1", "2020-01-01", "2020-02-01")],
//! );
//! let reader = Identity::new().with_username("doc1");
//! let grants = visible_to(&record, &reader).unwrap();
//! assert_eq!(grants.len(), 1);
//! ```

pub mod error;
pub mod identity;
pub mod policy;
pub mod visibility;

pub use error::{CredentialError, PermsError, Result};
pub use identity::{
    resolve_attribute, resolve_optional, AttributeNames, CredentialSource, Identity,
    StaticCredentials,
};
pub use policy::{WritePolicy, LEGACY_WRITERS, PATIENT_ROLE};
pub use visibility::{visible_grants, visible_to};
