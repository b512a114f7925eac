//! Error types for MedGate Core.

use thiserror::Error;

/// Errors raised while encoding or decoding stored state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Stored bytes do not decode to a grant list.
    #[error("corrupt state under key {key}: {reason}")]
    CorruptState { key: String, reason: String },

    /// A grant list could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
