//! Strong type definitions for MedGate.
//!
//! Grants are immutable once built: fields are private and only exposed
//! through accessors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity a grant is addressed to.
///
/// Compared byte-for-byte against the caller's resolved username. No case
/// folding or trimming is applied.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(String);

impl DoctorId {
    /// Create a new doctor ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this ID names the given identity exactly.
    pub fn matches(&self, identity: &str) -> bool {
        self.0 == identity
    }
}

impl fmt::Debug for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DoctorId({})", self.0)
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DoctorId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for DoctorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One sharing permission: a doctor may view one test result over a
/// date window.
///
/// The dates are opaque tokens. They are stored and compared as written and
/// are never parsed or range-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    doctor_id: DoctorId,
    test_id: String,
    start_date: String,
    end_date: String,
}

impl AccessGrant {
    /// Create a new grant.
    pub fn new(
        doctor_id: impl Into<DoctorId>,
        test_id: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            test_id: test_id.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// The doctor this grant is addressed to.
    pub fn doctor_id(&self) -> &DoctorId {
        &self.doctor_id
    }

    /// The test result being shared.
    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// Start of the sharing window, as stored.
    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    /// End of the sharing window, as stored.
    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    /// Check if this grant is addressed to `identity`.
    pub fn is_addressed_to(&self, identity: &str) -> bool {
        self.doctor_id.matches(identity)
    }
}

/// A patient's grant list, keyed by the ledger key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    patient_id: String,
    access_grants: Vec<AccessGrant>,
}

impl PatientRecord {
    /// Create a record for `patient_id` holding `grants` in order.
    pub fn new(patient_id: impl Into<String>, grants: Vec<AccessGrant>) -> Self {
        Self {
            patient_id: patient_id.into(),
            access_grants: grants,
        }
    }

    /// The ledger key this record lives under.
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// The grants, in stored order.
    pub fn grants(&self) -> &[AccessGrant] {
        &self.access_grants
    }

    pub fn is_empty(&self) -> bool {
        self.access_grants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.access_grants.len()
    }
}
