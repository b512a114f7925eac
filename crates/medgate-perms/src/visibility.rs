//! Grant visibility on the read path.
//!
//! A reader sees the grants addressed to their username and nothing else.
//! Matching grants keep their stored relative order.

use medgate_core::{AccessGrant, PatientRecord};

use crate::error::{PermsError, Result};
use crate::identity::Identity;

/// Grants in `grants` addressed to `username`, in stored order.
pub fn visible_grants<'a>(
    grants: &'a [AccessGrant],
    username: &'a str,
) -> impl Iterator<Item = &'a AccessGrant> + 'a {
    grants.iter().filter(move |g| g.is_addressed_to(username))
}

/// Reduce `record` to the grants `reader` may see.
///
/// Grants addressed to anyone else are dropped. A reader left with no grants
/// is denied outright, so "nothing shared with you" is never confused with
/// "this patient shares nothing".
pub fn visible_to(record: &PatientRecord, reader: &Identity) -> Result<Vec<AccessGrant>> {
    let username = reader.username().ok_or_else(|| PermsError::Identity {
        attribute: "username".to_string(),
        cause: "reader identity has no username".to_string(),
    })?;

    let key = record.patient_id().to_string();
    let total = record.len();
    let visible: Vec<AccessGrant> = visible_grants(record.grants(), username)
        .cloned()
        .collect();

    if visible.is_empty() {
        tracing::warn!(reader = username, key = %key, "no grants visible to reader");
        return Err(PermsError::AccessDenied { key });
    }

    tracing::debug!(
        reader = username,
        key = %key,
        visible = visible.len(),
        total,
        "filtered grant list"
    );
    Ok(visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grant(doctor: &str, test: &str) -> AccessGrant {
        AccessGrant::new(doctor, test, "2020-01-01", "2020-02-01")
    }

    #[test]
    fn test_reader_sees_only_own_grants() {
        let record = PatientRecord::new(
            "patient42",
            vec![grant("doc1", "t1"), grant("doc2", "t2"), grant("doc1", "t3")],
        );
        let reader = Identity::new().with_username("doc1");

        let visible = visible_to(&record, &reader).unwrap();
        assert_eq!(visible, vec![grant("doc1", "t1"), grant("doc1", "t3")]);
    }

    #[test]
    fn test_reader_without_grants_is_denied() {
        let record = PatientRecord::new("patient42", vec![grant("doc1", "t1")]);
        let reader = Identity::new().with_username("doc2");

        let err = visible_to(&record, &reader).unwrap_err();
        match &err {
            PermsError::AccessDenied { key } => assert_eq!(key, "patient42"),
            other => panic!("expected AccessDenied, got {:?}", other),
        }
        // Must not leak whose grants exist.
        assert!(!err.to_string().contains("doc1"));
    }

    #[test]
    fn test_empty_record_is_denied() {
        let record = PatientRecord::new("patient42", vec![]);
        let reader = Identity::new().with_username("doc1");

        assert!(matches!(
            visible_to(&record, &reader),
            Err(PermsError::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_match_is_exact() {
        let record = PatientRecord::new("p", vec![grant("Doc1", "t1"), grant("doc10", "t2")]);
        let reader = Identity::new().with_username("doc1");

        assert!(visible_to(&record, &reader).is_err());
    }

    #[test]
    fn test_reader_without_username() {
        let record = PatientRecord::new("p", vec![grant("doc1", "t1")]);
        let reader = Identity::new().with_role("Doctor");

        assert!(matches!(
            visible_to(&record, &reader),
            Err(PermsError::Identity { .. })
        ));
    }

    fn doctor() -> impl Strategy<Value = String> {
        prop_oneof![Just("doc1"), Just("doc2"), Just("Doc1"), Just("doc3")].prop_map(String::from)
    }

    proptest! {
        #[test]
        fn test_filter_is_ordered_subsequence(
            doctors in prop::collection::vec(doctor(), 0..24),
            reader in doctor(),
        ) {
            let grants: Vec<AccessGrant> = doctors
                .iter()
                .enumerate()
                .map(|(i, d)| grant(d, &format!("t{}", i)))
                .collect();
            let expected: Vec<AccessGrant> = grants
                .iter()
                .filter(|g| g.doctor_id().as_str() == reader)
                .cloned()
                .collect();

            let borrowed: Vec<&AccessGrant> = visible_grants(&grants, &reader).collect();
            prop_assert_eq!(borrowed.len(), expected.len());

            let record = PatientRecord::new("p", grants.clone());
            let identity = Identity::new().with_username(reader.clone());
            match visible_to(&record, &identity) {
                Ok(visible) => {
                    prop_assert!(!expected.is_empty());
                    prop_assert_eq!(visible, expected);
                }
                Err(PermsError::AccessDenied { .. }) => prop_assert!(expected.is_empty()),
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
