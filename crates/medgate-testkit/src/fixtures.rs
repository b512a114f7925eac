//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bytes::Bytes;
use medgate::{Chaincode, ChaincodeConfig, Result, Stub};
use medgate_core::{decode_grants, AccessGrant};
use medgate_perms::StaticCredentials;
use medgate_store::MemoryLedger;

/// Patient key used throughout the scenarios.
pub const SAMPLE_PATIENT: &str = "patient42";

/// A chaincode wired to a fresh in-memory ledger.
pub struct TestFixture {
    pub chaincode: Chaincode,
    pub ledger: MemoryLedger,
}

impl TestFixture {
    /// Default configuration: role-based writes, `patientDoctorApp` system key.
    pub fn new() -> Self {
        Self::with_config(ChaincodeConfig::default())
    }

    pub fn with_config(config: ChaincodeConfig) -> Self {
        Self {
            chaincode: Chaincode::new(config),
            ledger: MemoryLedger::new(),
        }
    }

    /// Run `init` with `value`.
    pub async fn init(&self, value: &str) -> Result<Option<Bytes>> {
        let nobody = StaticCredentials::new();
        self.chaincode
            .invoke(&Stub::new(&self.ledger, &nobody), "init", &[value])
            .await
    }

    /// Invoke `write` with arbitrary credentials and a raw value.
    pub async fn write_raw(
        &self,
        credentials: &StaticCredentials,
        key: &str,
        value: &str,
    ) -> Result<Option<Bytes>> {
        self.chaincode
            .invoke(&Stub::new(&self.ledger, credentials), "write", &[key, value])
            .await
    }

    /// Write `grants` under `key` as a caller holding the Patient role.
    pub async fn write_as_patient(
        &self,
        key: &str,
        grants: &[AccessGrant],
    ) -> Result<Option<Bytes>> {
        let patient = StaticCredentials::user_with_role("doc_writer", "Patient");
        self.write_raw(&patient, key, &grants_json(grants)).await
    }

    /// Query `read` with arbitrary credentials.
    pub async fn read_raw(&self, credentials: &StaticCredentials, key: &str) -> Result<Bytes> {
        self.chaincode
            .query(&Stub::new(&self.ledger, credentials), "read", &[key])
            .await
            .map(Option::unwrap_or_default)
    }

    /// Read `key` as the user `username` (no role) and decode the result.
    pub async fn read_grants_as(&self, username: &str, key: &str) -> Result<Vec<AccessGrant>> {
        let bytes = self.read_raw(&StaticCredentials::user(username), key).await?;
        Ok(decode_grants(key, &bytes)?)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode grants the way a client submits them.
pub fn grants_json(grants: &[AccessGrant]) -> String {
    serde_json::to_string(grants).unwrap_or_else(|_| "[]".to_string())
}
