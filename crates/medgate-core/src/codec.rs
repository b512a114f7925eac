//! Stored-state codec.
//!
//! A patient key holds a JSON array of grant objects with the fields
//! `doctorId`, `testId`, `startDate` and `endDate`, all strings and all
//! required:
//!
//! ```json
//! [{"doctorId":"doc1","testId":"t1","startDate":"2020-01-01","endDate":"2020-02-01"}]
//! ```
//!
//! Decoding is strict. Empty input, `null`, a truncated document, a value of
//! the wrong type or a grant with a missing field is rejected with
//! [`CoreError::CorruptState`]; nothing is ever defaulted. The error names
//! where decoding stopped, never what it found there.

use serde_json::error::Category;

use crate::error::{CoreError, Result};
use crate::types::{AccessGrant, PatientRecord};

/// Decode the grant list stored under `key`.
pub fn decode_grants(key: &str, bytes: &[u8]) -> Result<Vec<AccessGrant>> {
    serde_json::from_slice::<Vec<AccessGrant>>(bytes).map_err(|e| CoreError::CorruptState {
        key: key.to_owned(),
        reason: describe(&e),
    })
}

// serde_json's own message quotes the offending input.
fn describe(e: &serde_json::Error) -> String {
    let what = match e.classify() {
        Category::Io => "unreadable value",
        Category::Syntax => "malformed JSON",
        Category::Data => "not a grant list",
        Category::Eof => "truncated value",
    };
    format!("{} at line {} column {}", what, e.line(), e.column())
}

/// Encode a grant list to its stored form.
pub fn encode_grants(grants: &[AccessGrant]) -> Result<Vec<u8>> {
    serde_json::to_vec(grants).map_err(|e| CoreError::Encoding(e.to_string()))
}

impl PatientRecord {
    /// Decode the record stored under `key`.
    pub fn decode(key: &str, bytes: &[u8]) -> Result<Self> {
        let grants = decode_grants(key, bytes)?;
        Ok(Self::new(key, grants))
    }

    /// Encode this record's grant list to its stored form.
    ///
    /// The patient ID is not part of the value; it is the key.
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode_grants(self.grants())
    }
}
