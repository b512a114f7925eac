//! # MedGate Core
//!
//! Pure types for the MedGate record-sharing gate: access grants, patient
//! records, and the codec that maps them to and from the bytes held in the
//! ledger's world state.
//!
//! This crate contains no I/O, no storage and no identity handling. It is
//! pure computation over the stored data model.
//!
//! ## Key Types
//!
//! - [`AccessGrant`] - One doctor's permission to view one test result
//! - [`PatientRecord`] - A patient's full, ordered grant list
//! - [`DoctorId`] - The identity string a grant is addressed to
//!
//! ## Encoding
//!
//! A patient key holds the JSON array of that patient's grants. See the
//! [`codec`] module.

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{decode_grants, encode_grants};
pub use error::{CoreError, Result};
pub use types::{AccessGrant, DoctorId, PatientRecord};
