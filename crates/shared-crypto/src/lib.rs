//! # Shared Crypto - Hashing and Signature Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, SHA-512, SHA3-256, BLAKE3 | Unit, Merkle and block hashes |
//! | `signatures` | Ed25519 | Unicity seal signatures |
//!
//! ## Reentrancy
//!
//! Every hash computation gets a fresh [`DigestHasher`] from
//! [`HashAlgorithm::hasher`]. Hasher state is never shared between calls,
//! so concurrent proof construction needs no synchronization.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{DigestHasher, HashAlgorithm};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
