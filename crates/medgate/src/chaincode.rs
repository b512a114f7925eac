//! The chaincode: request dispatch and the access gate.
//!
//! [`Chaincode`] holds configuration only. The ledger and the caller's
//! credential arrive with every call in a [`Stub`], and the caller's identity
//! is resolved afresh each time.

use bytes::Bytes;
use medgate_perms::{visible_to, CredentialSource, Identity};
use medgate_store::Ledger;

use crate::config::ChaincodeConfig;
use crate::error::{ChaincodeError, Result};
use crate::state::StateAccessor;

/// Collaborators supplied by the ledger runtime for one invocation.
pub struct Stub<'a, L: Ledger + ?Sized, C: CredentialSource + ?Sized> {
    ledger: &'a L,
    credentials: &'a C,
}

impl<'a, L: Ledger + ?Sized, C: CredentialSource + ?Sized> Stub<'a, L, C> {
    pub fn new(ledger: &'a L, credentials: &'a C) -> Self {
        Self {
            ledger,
            credentials,
        }
    }

    pub fn ledger(&self) -> &'a L {
        self.ledger
    }

    pub fn credentials(&self) -> &'a C {
        self.credentials
    }
}

/// The operations the chaincode serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Store the system value.
    Init,
    /// Replace a grant list.
    Write,
    /// Read a grant list (or the system value).
    Read,
}

impl Operation {
    /// Look up an operation by its wire name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "init" => Some(Operation::Init),
            "write" => Some(Operation::Write),
            "read" => Some(Operation::Read),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Write => "write",
            Operation::Read => "read",
        }
    }

    /// Number of arguments the operation takes.
    pub fn arity(self) -> usize {
        match self {
            Operation::Init | Operation::Read => 1,
            Operation::Write => 2,
        }
    }

    /// Whether the operation leaves world state untouched.
    pub fn is_query(self) -> bool {
        matches!(self, Operation::Read)
    }

    fn check_arity<A>(self, args: &[A]) -> Result<()> {
        if args.len() != self.arity() {
            return Err(ChaincodeError::ArgumentCount {
                operation: self.name(),
                expected: self.arity(),
                got: args.len(),
            });
        }
        Ok(())
    }
}

/// Stateless handler for the patient/doctor sharing chaincode.
#[derive(Debug, Clone, Default)]
pub struct Chaincode {
    config: ChaincodeConfig,
}

impl Chaincode {
    /// Create a handler with the given configuration.
    pub fn new(config: ChaincodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entry points
    // ─────────────────────────────────────────────────────────────────────────

    /// Transaction entry point: serves `init` and `write`.
    pub async fn invoke<L, C, A>(
        &self,
        stub: &Stub<'_, L, C>,
        function: &str,
        args: &[A],
    ) -> Result<Option<Bytes>>
    where
        L: Ledger + ?Sized,
        C: CredentialSource + ?Sized,
        A: AsRef<str>,
    {
        tracing::debug!(function, "invoke is running");
        match Operation::parse(function) {
            Some(Operation::Init) => self.init(stub.ledger(), args).await,
            Some(Operation::Write) => self.write(stub, args).await,
            _ => Err(unknown("invoke", function)),
        }
    }

    /// Query entry point: serves `read`.
    pub async fn query<L, C, A>(
        &self,
        stub: &Stub<'_, L, C>,
        function: &str,
        args: &[A],
    ) -> Result<Option<Bytes>>
    where
        L: Ledger + ?Sized,
        C: CredentialSource + ?Sized,
        A: AsRef<str>,
    {
        tracing::debug!(function, "query is running");
        match Operation::parse(function) {
            Some(Operation::Read) => self.read(stub, args).await.map(Some),
            _ => Err(unknown("query", function)),
        }
    }

    /// Single entry point serving every operation.
    pub async fn handle<L, C, A>(
        &self,
        stub: &Stub<'_, L, C>,
        function: &str,
        args: &[A],
    ) -> Result<Option<Bytes>>
    where
        L: Ledger + ?Sized,
        C: CredentialSource + ?Sized,
        A: AsRef<str>,
    {
        match Operation::parse(function) {
            Some(op) if op.is_query() => self.query(stub, function, args).await,
            Some(_) => self.invoke(stub, function, args).await,
            None => Err(unknown("handle", function)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Store `args[0]` under the system key.
    pub async fn init<L, A>(&self, ledger: &L, args: &[A]) -> Result<Option<Bytes>>
    where
        L: Ledger + ?Sized,
        A: AsRef<str>,
    {
        Operation::Init.check_arity(args)?;

        let value = Bytes::copy_from_slice(args[0].as_ref().as_bytes());
        StateAccessor::new(ledger)
            .put(&self.config.system_key, value)
            .await?;
        Ok(None)
    }

    /// Replace the grant list under `args[0]` with `args[1]`.
    ///
    /// The caller is checked against the write policy before anything else
    /// touches state. The value is stored verbatim; when validation is on,
    /// a value for a patient key must first decode as a grant list.
    pub async fn write<L, C, A>(&self, stub: &Stub<'_, L, C>, args: &[A]) -> Result<Option<Bytes>>
    where
        L: Ledger + ?Sized,
        C: CredentialSource + ?Sized,
        A: AsRef<str>,
    {
        Operation::Write.check_arity(args)?;
        let key = args[0].as_ref();
        let value = args[1].as_ref();

        let policy = &self.config.write_policy;
        let identity =
            Identity::resolve_for_write(stub.credentials(), &self.config.attributes, policy)
                .await?;
        policy.authorize(&identity, key)?;

        let state = StateAccessor::new(stub.ledger());
        if self.config.validate_writes && !self.config.is_system_key(key) {
            state.validate(key, value.as_bytes())?;
        }

        state
            .put(key, Bytes::copy_from_slice(value.as_bytes()))
            .await?;
        tracing::debug!(key, writer = identity.display_name(), "grant list replaced");
        Ok(None)
    }

    /// Read the value under `args[0]` as the caller is allowed to see it.
    ///
    /// The system key is returned as stored. Any other key is decoded and
    /// cut down to the grants addressed to the caller; a caller with none is
    /// denied.
    pub async fn read<L, C, A>(&self, stub: &Stub<'_, L, C>, args: &[A]) -> Result<Bytes>
    where
        L: Ledger + ?Sized,
        C: CredentialSource + ?Sized,
        A: AsRef<str>,
    {
        Operation::Read.check_arity(args)?;
        let key = args[0].as_ref();

        let state = StateAccessor::new(stub.ledger());
        if self.config.is_system_key(key) {
            return Ok(state.get(key).await?);
        }

        let record = state.load_record(key).await?;
        let reader = Identity::resolve_for_read(stub.credentials(), &self.config.attributes).await?;
        let visible = visible_to(&record, &reader)?;

        state.encode(&visible)
    }
}

fn unknown(entry: &'static str, function: &str) -> ChaincodeError {
    tracing::warn!(entry, function, "did not find function");
    ChaincodeError::UnknownOperation {
        entry,
        name: function.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use medgate_perms::StaticCredentials;
    use medgate_store::MemoryLedger;

    const GRANTS: &str = r#"[{"doctorId":"doc1","testId":"t1","startDate":"2020-01-01","endDate":"2020-02-01"},{"doctorId":"doc2","testId":"t2","startDate":"2020-01-05","endDate":"2020-03-01"}]"#;

    fn patient() -> StaticCredentials {
        StaticCredentials::user_with_role("alice", "Patient")
    }

    #[test]
    fn test_operation_table() {
        assert_eq!(Operation::parse("write"), Some(Operation::Write));
        assert_eq!(Operation::parse("Write"), None);
        assert_eq!(Operation::Write.arity(), 2);
        assert!(Operation::Read.is_query());
        assert!(!Operation::Init.is_query());
    }

    #[tokio::test]
    async fn test_init_arity() {
        let chaincode = Chaincode::default();
        let ledger = MemoryLedger::new();

        let err = chaincode.init(&ledger, &["a", "b"]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentCount);

        let none: [&str; 0] = [];
        assert!(chaincode.init(&ledger, &none).await.is_err());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_partial_overlap() {
        let chaincode = Chaincode::default();
        let ledger = MemoryLedger::new();
        let creds = patient();

        chaincode
            .write(&Stub::new(&ledger, &creds), &["patient42", GRANTS])
            .await
            .unwrap();

        let doctor = StaticCredentials::user("doc2");
        let bytes = chaincode
            .read(&Stub::new(&ledger, &doctor), &["patient42"])
            .await
            .unwrap();

        let grants = medgate_core::decode_grants("patient42", &bytes).unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].test_id(), "t2");
    }

    #[tokio::test]
    async fn test_write_rejects_malformed_value() {
        let chaincode = Chaincode::default();
        let ledger = MemoryLedger::new();
        let creds = patient();

        let err = chaincode
            .write(&Stub::new(&ledger, &creds), &["patient42", "not json"])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CorruptState);
        assert!(!ledger.contains_key("patient42"));
    }

    #[tokio::test]
    async fn test_write_without_validation_stores_verbatim() {
        let chaincode = Chaincode::new(ChaincodeConfig::default().with_validate_writes(false));
        let ledger = MemoryLedger::new();
        let creds = patient();

        chaincode
            .write(&Stub::new(&ledger, &creds), &["patient42", "not json"])
            .await
            .unwrap();

        let reader = StaticCredentials::user("doc1");
        let err = chaincode
            .read(&Stub::new(&ledger, &reader), &["patient42"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptState);
    }

    #[tokio::test]
    async fn test_entry_points_split_operations() {
        let chaincode = Chaincode::default();
        let ledger = MemoryLedger::new();
        let creds = patient();
        let stub = Stub::new(&ledger, &creds);

        let err = chaincode
            .invoke(&stub, "read", &["patient42"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);

        let err = chaincode
            .query(&stub, "write", &["patient42", GRANTS])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_handle_routes_all_operations() {
        let chaincode = Chaincode::default();
        let ledger = MemoryLedger::new();
        let creds = patient();
        let stub = Stub::new(&ledger, &creds);

        chaincode.handle(&stub, "init", &["v1"]).await.unwrap();
        chaincode
            .handle(&stub, "write", &["patient42", GRANTS])
            .await
            .unwrap();
        let value = chaincode
            .handle(&stub, "read", &["patientDoctorApp"])
            .await
            .unwrap();
        assert_eq!(value.as_deref(), Some(&b"v1"[..]));

        let err = chaincode.handle(&stub, "delete", &["patient42"]).await.unwrap_err();
        assert_eq!(err.to_string(), "received unknown function handle: delete");
    }
}
