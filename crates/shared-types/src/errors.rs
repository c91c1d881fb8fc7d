//! # Error Types
//!
//! Defines error types for ledger entities and certificate validation.

use thiserror::Error;

/// Errors raised while converting or encoding ledger entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Unit id bytes are not exactly 32 bytes long.
    #[error("Invalid unit id length: expected 32 bytes, got {0}")]
    InvalidUnitIdLength(usize),

    /// Canonical serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while validating a unicity certificate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    /// The trust base has no verifiers.
    #[error("Trust base is empty")]
    NoVerifiers,

    /// Certificate was issued for another system.
    #[error("System identifier mismatch: expected {expected}, got {actual}")]
    SystemIdentifierMismatch { expected: String, actual: String },

    /// Certificate was issued for another system description.
    #[error("System description hash mismatch")]
    SystemDescriptionHashMismatch,

    /// Seal hash does not commit to this certificate's input record.
    #[error("Unicity seal hash mismatch: expected {expected}, got {actual}")]
    SealHashMismatch { expected: String, actual: String },

    /// Seal carries no signatures.
    #[error("Unicity seal is not signed")]
    MissingSignatures,

    /// Seal was signed by a node outside the trust base.
    #[error("Unknown signer: {0}")]
    UnknownSigner(String),

    /// A signature did not verify.
    #[error("Invalid signature from {signer}: {reason}")]
    InvalidSignature { signer: String, reason: String },
}
