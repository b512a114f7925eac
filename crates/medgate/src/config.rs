//! Chaincode configuration.

use medgate_perms::{AttributeNames, WritePolicy};
use serde::{Deserialize, Serialize};

/// Reserved key of the patient/doctor deployment.
pub const DEFAULT_SYSTEM_KEY: &str = "patientDoctorApp";

/// Reserved key of the starter deployment.
pub const STARTER_SYSTEM_KEY: &str = "hello_world";

/// Configuration for the chaincode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaincodeConfig {
    /// Key `init` writes to. Its value is opaque and never grant-filtered.
    pub system_key: String,
    /// Who may replace a grant list.
    pub write_policy: WritePolicy,
    /// Whether a write must decode as a grant list before it is stored.
    pub validate_writes: bool,
    /// Credential attribute names.
    pub attributes: AttributeNames,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            system_key: DEFAULT_SYSTEM_KEY.to_string(),
            write_policy: WritePolicy::default(),
            validate_writes: true,
            attributes: AttributeNames::default(),
        }
    }
}

impl ChaincodeConfig {
    /// Role-free deployment: only the two legacy writer accounts may write.
    pub fn legacy_allow_list() -> Self {
        Self {
            write_policy: WritePolicy::legacy_allow_list(),
            ..Self::default()
        }
    }

    /// Starter deployment using the `hello_world` system key.
    pub fn starter() -> Self {
        Self {
            system_key: STARTER_SYSTEM_KEY.to_string(),
            ..Self::default()
        }
    }

    pub fn with_system_key(mut self, key: impl Into<String>) -> Self {
        self.system_key = key.into();
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_validate_writes(mut self, validate: bool) -> Self {
        self.validate_writes = validate;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check whether `key` is the reserved system key.
    pub fn is_system_key(&self, key: &str) -> bool {
        key == self.system_key
    }
}
