//! # Unicity Certificates
//!
//! A unicity certificate is the root chain's signed commitment to the
//! state of one partition in one round. Block proofs carry it unchanged;
//! verifiers check it against their trust base and then read the
//! committed block hash out of it.
//!
//! ```text
//! InputRecord ──┐
//! system id ────┼──→ H(..) == UnicitySeal.hash ──→ signed by root validators
//! description ──┘
//! ```

use serde::{Deserialize, Serialize};
use shared_crypto::{CryptoError, Ed25519KeyPair, Ed25519PublicKey, HashAlgorithm};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::entities::SystemIdentifier;
use crate::errors::CertificateError;

/// Partition state transition as seen by the root chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// State hash before the round.
    pub previous_hash: Vec<u8>,
    /// State hash after the round.
    pub hash: Vec<u8>,
    /// Hash of the block produced in the round.
    pub block_hash: Vec<u8>,
    /// Partition-specific summary value.
    pub summary_value: Vec<u8>,
}

impl InputRecord {
    /// Concatenated field bytes, in declaration order.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.previous_hash.len()
                + self.hash.len()
                + self.block_hash.len()
                + self.summary_value.len(),
        );
        out.extend_from_slice(&self.previous_hash);
        out.extend_from_slice(&self.hash);
        out.extend_from_slice(&self.block_hash);
        out.extend_from_slice(&self.summary_value);
        out
    }
}

/// Binds the input record to one partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnicityTreeCertificate {
    /// Partition the certificate was issued for.
    pub system_identifier: SystemIdentifier,
    /// Hash of the partition description record.
    pub system_description_hash: Vec<u8>,
}

/// Root chain seal over the unicity tree root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnicitySeal {
    /// Root chain round that produced the seal.
    pub root_chain_round_number: u64,
    /// Unicity tree root.
    pub hash: Vec<u8>,
    /// Signer id → signature over [`UnicitySeal::signing_bytes`].
    pub signatures: BTreeMap<String, Vec<u8>>,
}

impl UnicitySeal {
    /// Bytes covered by validator signatures.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.hash.len());
        out.extend_from_slice(&self.root_chain_round_number.to_be_bytes());
        out.extend_from_slice(&self.hash);
        out
    }

    /// Add a validator signature.
    pub fn sign(&mut self, signer_id: impl Into<String>, key: &Ed25519KeyPair) {
        let signature = key.sign(&self.signing_bytes());
        self.signatures.insert(signer_id.into(), signature.to_vec());
    }
}

/// Certificate produced and signed by the root chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnicityCertificate {
    /// Certified partition state transition.
    pub input_record: InputRecord,
    /// Partition binding.
    pub unicity_tree_certificate: UnicityTreeCertificate,
    /// Signed seal.
    pub unicity_seal: UnicitySeal,
}

impl UnicityCertificate {
    /// Create an unsigned certificate whose seal commits to `input_record`.
    pub fn new(
        input_record: InputRecord,
        system_identifier: SystemIdentifier,
        system_description_hash: Vec<u8>,
        root_chain_round_number: u64,
        algorithm: HashAlgorithm,
    ) -> Self {
        let unicity_tree_certificate = UnicityTreeCertificate {
            system_identifier,
            system_description_hash,
        };
        let hash = unicity_tree_root(&input_record, &unicity_tree_certificate, algorithm);
        Self {
            input_record,
            unicity_tree_certificate,
            unicity_seal: UnicitySeal {
                root_chain_round_number,
                hash,
                signatures: BTreeMap::new(),
            },
        }
    }

    /// Block hash this certificate commits to.
    pub fn committed_block_hash(&self) -> &[u8] {
        &self.input_record.block_hash
    }

    /// Partition embedded in the certificate.
    pub fn system_identifier(&self) -> SystemIdentifier {
        self.unicity_tree_certificate.system_identifier
    }

    /// Partition description hash embedded in the certificate.
    pub fn system_description_hash(&self) -> &[u8] {
        &self.unicity_tree_certificate.system_description_hash
    }

    /// Validate the certificate against a trust base.
    ///
    /// Checks, in order: non-empty trust base, partition binding, seal
    /// commitment, and every seal signature.
    pub fn is_valid(
        &self,
        trust_base: &TrustBase,
        algorithm: HashAlgorithm,
        system_identifier: SystemIdentifier,
        system_description_hash: &[u8],
    ) -> Result<(), CertificateError> {
        if trust_base.is_empty() {
            return Err(CertificateError::NoVerifiers);
        }

        let tree = &self.unicity_tree_certificate;
        if tree.system_identifier != system_identifier {
            return Err(CertificateError::SystemIdentifierMismatch {
                expected: system_identifier.to_string(),
                actual: tree.system_identifier.to_string(),
            });
        }
        if tree.system_description_hash != system_description_hash {
            return Err(CertificateError::SystemDescriptionHashMismatch);
        }

        let expected_root = unicity_tree_root(&self.input_record, tree, algorithm);
        if expected_root != self.unicity_seal.hash {
            return Err(CertificateError::SealHashMismatch {
                expected: hex::encode(&expected_root),
                actual: hex::encode(&self.unicity_seal.hash),
            });
        }

        let seal = &self.unicity_seal;
        if seal.signatures.is_empty() {
            return Err(CertificateError::MissingSignatures);
        }
        let message = seal.signing_bytes();
        for (signer, signature) in &seal.signatures {
            let verifier = trust_base
                .get(signer)
                .ok_or_else(|| CertificateError::UnknownSigner(signer.clone()))?;
            verifier
                .verify_bytes(&message, signature)
                .map_err(|e| CertificateError::InvalidSignature {
                    signer: signer.clone(),
                    reason: e.to_string(),
                })?;
        }

        debug!(
            system = %system_identifier,
            round = seal.root_chain_round_number,
            signers = seal.signatures.len(),
            "Unicity certificate valid"
        );
        Ok(())
    }
}

/// H(input_record || system_identifier || system_description_hash).
fn unicity_tree_root(
    input_record: &InputRecord,
    tree: &UnicityTreeCertificate,
    algorithm: HashAlgorithm,
) -> Vec<u8> {
    algorithm.digest_concat(&[
        input_record.bytes().as_slice(),
        &tree.system_identifier.as_bytes()[..],
        tree.system_description_hash.as_slice(),
    ])
}

/// Verifies signatures produced by one root chain validator.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature` over `message`.
    fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError>;
}

/// Ed25519-backed verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Verifier(pub Ed25519PublicKey);

impl SignatureVerifier for Ed25519Verifier {
    fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        self.0.verify(message, signature)
    }
}

/// Named set of root chain verifiers.
#[derive(Clone, Default)]
pub struct TrustBase {
    verifiers: BTreeMap<String, Arc<dyn SignatureVerifier>>,
}

impl TrustBase {
    /// Empty trust base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_verifier(
        mut self,
        id: impl Into<String>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        self.insert(id, verifier);
        self
    }

    /// Register a verifier under `id`, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<String>, verifier: Arc<dyn SignatureVerifier>) {
        self.verifiers.insert(id.into(), verifier);
    }

    /// Look up a verifier.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn SignatureVerifier>> {
        self.verifiers.get(id)
    }

    /// True if no verifiers are registered.
    pub fn is_empty(&self) -> bool {
        self.verifiers.is_empty()
    }

    /// Number of registered verifiers.
    pub fn len(&self) -> usize {
        self.verifiers.len()
    }
}

impl fmt::Debug for TrustBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustBase")
            .field("verifiers", &self.verifiers.keys().collect::<Vec<_>>())
            .finish()
    }
}
