//! # Value Objects
//!
//! Immutable configuration for proof construction and verification.

use serde::{Deserialize, Serialize};
use shared_crypto::HashAlgorithm;

/// Longest unit chain a verifier accepts: one leaf item plus one sibling
/// per bit of a 256-bit key.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 257;

/// Configuration shared by the proof builder and verifier.
///
/// Both sides MUST use the same hash algorithm or every proof fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofConfig {
    /// Hash algorithm for every hash in the proof (default: SHA-256).
    pub hash_algorithm: HashAlgorithm,
    /// Maximum accepted unit chain length.
    pub max_chain_depth: usize,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::Sha256,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

impl ProofConfig {
    /// Config with a specific algorithm and default limits.
    pub fn with_algorithm(hash_algorithm: HashAlgorithm) -> Self {
        Self {
            hash_algorithm,
            ..Self::default()
        }
    }

    /// Create a config for testing (shallow chains only).
    pub fn for_testing() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::Sha256,
            max_chain_depth: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_config_default() {
        let config = ProofConfig::default();
        assert_eq!(config.hash_algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
    }

    #[test]
    fn test_with_algorithm_keeps_limits() {
        let config = ProofConfig::with_algorithm(HashAlgorithm::Blake3);
        assert_eq!(config.hash_algorithm, HashAlgorithm::Blake3);
        assert_eq!(config.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: ProofConfig = serde_json::from_str(r#"{"hash_algorithm":"sha3-256"}"#).unwrap();
        assert_eq!(config.hash_algorithm, HashAlgorithm::Sha3_256);
        assert_eq!(config.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let result: Result<ProofConfig, _> = serde_json::from_str(r#"{"hash_algorithm":"md5"}"#);
        assert!(result.is_err());
    }
}
