//! # Domain Errors
//!
//! Error types for block proof construction and verification.
//!
//! ## Taxonomy
//!
//! | Kind | Raised when | Retry? |
//! |------|-------------|--------|
//! | `Input` | Malformed call arguments | No |
//! | `HashComputation` | Serialization / algorithm failure | No (deterministic) |
//! | `InvalidCertificate` | Unicity certificate rejected | No |
//! | `ProofVerificationFailed` | Any recomputed hash mismatch | No |

use serde::{Deserialize, Serialize};
use shared_crypto::CryptoError;
use shared_types::{CertificateError, TypesError, UnitId};
use thiserror::Error;

/// Call-boundary argument errors. Raised before any hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Trust base passed to the verifier is empty.
    #[error("no verifiers supplied")]
    MissingVerifiers,

    /// Unit id bytes have the wrong width.
    #[error("invalid unit id: expected 32 bytes, got {len}")]
    InvalidUnitId { len: usize },

    /// The block carries more than one primary transaction for a unit.
    #[error("unit {unit_id} has more than one primary transaction")]
    DuplicatePrimary { unit_id: UnitId },

    /// Requested secondary transaction does not exist.
    #[error("secondary index {index} out of range (unit has {count})")]
    SecondaryIndexOutOfRange { index: usize, count: usize },

    /// Numeric proof type outside 0..=4.
    #[error("unknown proof type {0}")]
    UnknownProofType(u8),

    /// Proof bytes could not be decoded.
    #[error("malformed proof encoding: {0}")]
    MalformedProof(String),
}

/// Errors returned by proof construction and verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// Bad arguments.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Hash could not be computed.
    #[error("hash computation failed: {0}")]
    HashComputation(String),

    /// Certificate subsystem rejected the proof's certificate.
    #[error("invalid unicity certificate: {0}")]
    InvalidCertificate(#[from] CertificateError),

    /// A recomputed hash did not match. The only failure verifying clients
    /// need to branch on; `reason` is diagnostic text.
    #[error("proof verification failed: {reason}")]
    ProofVerificationFailed { reason: String },
}

impl ProofError {
    pub(crate) fn verification(reason: impl Into<String>) -> Self {
        Self::ProofVerificationFailed {
            reason: reason.into(),
        }
    }

    /// True for the verification sentinel.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::ProofVerificationFailed { .. })
    }

    /// Serializable classification of this error.
    pub fn kind(&self) -> ProofErrorKind {
        match self {
            Self::Input(_) => ProofErrorKind::Input,
            Self::HashComputation(_) => ProofErrorKind::HashComputation,
            Self::InvalidCertificate(_) => ProofErrorKind::InvalidCertificate,
            Self::ProofVerificationFailed { .. } => ProofErrorKind::VerificationFailed,
        }
    }
}

impl From<TypesError> for ProofError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::InvalidUnitIdLength(len) => Self::Input(InputError::InvalidUnitId { len }),
            TypesError::Serialization(message) => Self::HashComputation(message),
        }
    }
}

impl From<CryptoError> for ProofError {
    fn from(err: CryptoError) -> Self {
        Self::HashComputation(err.to_string())
    }
}

/// Error classification for callers that report errors across process
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofErrorKind {
    Input,
    HashComputation,
    InvalidCertificate,
    VerificationFailed,
}
