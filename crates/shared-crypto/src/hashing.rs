//! # Hash Algorithms
//!
//! Selectable digest algorithms for unit, Merkle and block hashing.
//!
//! Hashes are returned as `Vec<u8>` because the output width depends on the
//! algorithm (SHA-512 produces 64 bytes, the others 32).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;

use crate::CryptoError;

/// Supported hash algorithms.
///
/// The numeric value is the wire id used when an algorithm is carried
/// inside a serialized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256 (default).
    #[default]
    #[serde(rename = "sha256")]
    Sha256 = 0,
    /// SHA-512.
    #[serde(rename = "sha512")]
    Sha512 = 1,
    /// SHA3-256 (Keccak, FIPS 202).
    #[serde(rename = "sha3-256")]
    Sha3_256 = 2,
    /// BLAKE3 with 32-byte output.
    #[serde(rename = "blake3")]
    Blake3 = 3,
}

impl HashAlgorithm {
    /// Digest size in bytes.
    pub fn output_size(self) -> usize {
        match self {
            Self::Sha512 => 64,
            Self::Sha256 | Self::Sha3_256 | Self::Blake3 => 32,
        }
    }

    /// Create a fresh hasher. Never reuse one across computations.
    pub fn hasher(self) -> DigestHasher {
        match self {
            Self::Sha256 => DigestHasher::Sha256(Sha256::new()),
            Self::Sha512 => DigestHasher::Sha512(Sha512::new()),
            Self::Sha3_256 => DigestHasher::Sha3_256(Sha3_256::new()),
            Self::Blake3 => DigestHasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    /// Hash a single input.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.hasher();
        hasher.update(data);
        hasher.finalize()
    }

    /// Hash the concatenation of several inputs: H(a || b || ...).
    pub fn digest_concat(self, parts: &[&[u8]]) -> Vec<u8> {
        let mut hasher = self.hasher();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize()
    }

    /// All-zero value of digest width.
    ///
    /// Stands in for "no value" wherever a hash slot must be filled.
    pub fn zero_hash(self) -> Vec<u8> {
        vec![0u8; self.output_size()]
    }

    /// Wire id of this algorithm.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Sha3_256 => "sha3-256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "sha3-256" | "sha3_256" => Ok(Self::Sha3_256),
            "blake3" => Ok(Self::Blake3),
            other => Err(CryptoError::UnsupportedHashAlgorithm(other.to_string())),
        }
    }
}

impl TryFrom<u8> for HashAlgorithm {
    type Error = CryptoError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Sha256),
            1 => Ok(Self::Sha512),
            2 => Ok(Self::Sha3_256),
            3 => Ok(Self::Blake3),
            other => Err(CryptoError::UnsupportedHashAlgorithm(format!("id {}", other))),
        }
    }
}

/// Single-use hasher for one of the supported algorithms.
pub enum DigestHasher {
    /// SHA-256 state.
    Sha256(Sha256),
    /// SHA-512 state.
    Sha512(Sha512),
    /// SHA3-256 state.
    Sha3_256(Sha3_256),
    /// BLAKE3 state (boxed, the state is large).
    Blake3(Box<blake3::Hasher>),
}

impl DigestHasher {
    /// Feed data into the hasher.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        match self {
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
            Self::Sha3_256(h) => h.update(data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
        self
    }

    /// Consume the hasher and return the digest.
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Self::Sha256(h) => h.finalize().to_vec(),
            Self::Sha512(h) => h.finalize().to_vec(),
            Self::Sha3_256(h) => h.finalize().to_vec(),
            Self::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors_empty_input() {
        assert_eq!(
            hex::encode(HashAlgorithm::Sha256.digest(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(HashAlgorithm::Sha3_256.digest(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hex::encode(HashAlgorithm::Blake3.digest(b"")),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_sha256_abc() {
        assert_eq!(
            hex::encode(HashAlgorithm::Sha256.digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_output_sizes() {
        for alg in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
            HashAlgorithm::Sha3_256,
            HashAlgorithm::Blake3,
        ] {
            assert_eq!(alg.digest(b"x").len(), alg.output_size());
            assert_eq!(alg.zero_hash(), vec![0u8; alg.output_size()]);
        }
    }

    #[test]
    fn test_concat_equals_streaming() {
        let alg = HashAlgorithm::Sha256;
        assert_eq!(
            alg.digest_concat(&[b"hello ".as_slice(), b"world".as_slice()]),
            alg.digest(b"hello world")
        );
    }

    #[test]
    fn test_concat_is_order_sensitive() {
        let alg = HashAlgorithm::Sha3_256;
        assert_ne!(
            alg.digest_concat(&[b"left".as_slice(), b"right".as_slice()]),
            alg.digest_concat(&[b"right".as_slice(), b"left".as_slice()])
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("SHA256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert_eq!("sha3-256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha3_256));
        assert_eq!("blake3".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Blake3));
        assert!(matches!(
            "md5".parse::<HashAlgorithm>(),
            Err(CryptoError::UnsupportedHashAlgorithm(_))
        ));
    }

    #[test]
    fn test_wire_ids_roundtrip() {
        for id in 0u8..4 {
            let alg = HashAlgorithm::try_from(id).unwrap();
            assert_eq!(alg.id(), id);
        }
        assert!(HashAlgorithm::try_from(9).is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        let alg = HashAlgorithm::Sha512;
        assert_eq!(alg.to_string().parse::<HashAlgorithm>(), Ok(alg));
    }
}
