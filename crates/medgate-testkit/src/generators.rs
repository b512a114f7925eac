//! Proptest generators for property-based testing.

use proptest::prelude::*;

use medgate_core::{AccessGrant, DoctorId};

/// Doctors drawn from a small pool so that generated lists overlap.
///
/// Includes near-misses (`Doc1`, `doc1 `) to exercise exact matching.
pub fn doctor_id() -> impl Strategy<Value = DoctorId> {
    prop_oneof![
        Just("doc1"),
        Just("doc2"),
        Just("doc3"),
        Just("Doc1"),
        Just("doc1 "),
    ]
    .prop_map(DoctorId::from)
}

/// A calendar-looking date token. Never validated by the gate.
pub fn date() -> impl Strategy<Value = String> {
    (2000u32..2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
}

/// Generate a single grant.
pub fn access_grant() -> impl Strategy<Value = AccessGrant> {
    (doctor_id(), "t[0-9]{1,4}", date(), date())
        .prop_map(|(doctor, test, start, end)| AccessGrant::new(doctor, test, start, end))
}

/// Generate a grant list of up to `max_len` grants (possibly empty).
pub fn grant_list(max_len: usize) -> impl Strategy<Value = Vec<AccessGrant>> {
    prop::collection::vec(access_grant(), 0..=max_len)
}

/// A grant list together with the doctor reading it.
#[derive(Debug, Clone)]
pub struct GrantListParams {
    pub grants: Vec<AccessGrant>,
    pub reader: DoctorId,
}

impl GrantListParams {
    /// The grants `reader` should see, in order.
    pub fn expected_visible(&self) -> Vec<AccessGrant> {
        self.grants
            .iter()
            .filter(|g| g.doctor_id() == &self.reader)
            .cloned()
            .collect()
    }
}

impl Arbitrary for GrantListParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (grant_list(24), doctor_id())
            .prop_map(|(grants, reader)| GrantListParams { grants, reader })
            .boxed()
    }
}
