//! # Block Proof
//!
//! Tagged proof record. The tag decides which optional fields are present
//! and which verification formula applies.
//!
//! | Type | HashValue | UnitChain | SecondaryChain |
//! |------|-----------|-----------|----------------|
//! | EMPTYBLOCK | zero hash | absent or empty | absent |
//! | NOTRANS | zero hash | path for the absent unit | absent |
//! | PRIM | secondary root | path for the unit | absent |
//! | ONLYSEC | secondary root | path for the unit | absent |
//! | SEC | primary hash (zero if none) | path for the unit | secondary path |

use serde::{Deserialize, Serialize};
use shared_crypto::HashAlgorithm;
use shared_types::UnicityCertificate;
use std::fmt;

use super::errors::{InputError, ProofError};
use super::omt::ChainItem;
use super::secondary_tree::SecondaryPathItem;

/// Proof variant. Numeric values are part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ProofType {
    /// Unit has a primary transaction.
    Prim = 0,
    /// Witness for one secondary transaction.
    Sec = 1,
    /// Unit has only secondary transactions.
    OnlySec = 2,
    /// Unit not touched by the block.
    NoTrans = 3,
    /// Block has no transactions.
    EmptyBlock = 4,
}

impl ProofType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ProofType::Prim => "PRIM",
            ProofType::Sec => "SEC",
            ProofType::OnlySec => "ONLYSEC",
            ProofType::NoTrans => "NOTRANS",
            ProofType::EmptyBlock => "EMPTYBLOCK",
        }
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ProofType> for u8 {
    fn from(value: ProofType) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for ProofType {
    type Error = ProofError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProofType::Prim),
            1 => Ok(ProofType::Sec),
            2 => Ok(ProofType::OnlySec),
            3 => Ok(ProofType::NoTrans),
            4 => Ok(ProofType::EmptyBlock),
            other => Err(InputError::UnknownProofType(other).into()),
        }
    }
}

/// Proof that a transaction was, or a unit was not, part of a certified block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockProof {
    pub proof_type: ProofType,
    pub block_header_hash: Vec<u8>,
    pub hash_value: Vec<u8>,
    pub unit_chain: Option<Vec<ChainItem>>,
    pub secondary_chain: Option<Vec<SecondaryPathItem>>,
    /// Copied from the block; never recomputed here.
    pub unicity_certificate: UnicityCertificate,
}

impl BlockProof {
    /// Unit chain, or an empty slice when absent.
    pub fn unit_chain(&self) -> &[ChainItem] {
        self.unit_chain.as_deref().unwrap_or_default()
    }

    /// Secondary chain, or an empty slice when absent.
    pub fn secondary_chain(&self) -> &[SecondaryPathItem] {
        self.secondary_chain.as_deref().unwrap_or_default()
    }

    /// Tag-numbered binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProofError> {
        bincode::serialize(self).map_err(|e| ProofError::HashComputation(e.to_string()))
    }

    /// Decode a proof produced by [`BlockProof::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProofError> {
        bincode::deserialize(bytes).map_err(|e| InputError::MalformedProof(e.to_string()).into())
    }

    /// Check field presence and sizes against the proof type.
    ///
    /// Any violation is a verification failure.
    pub fn check_shape(
        &self,
        algorithm: HashAlgorithm,
        max_chain_depth: usize,
    ) -> Result<(), ProofError> {
        let unit_chain_len = self.unit_chain().len();
        if unit_chain_len > max_chain_depth {
            return Err(ProofError::verification(format!(
                "unit chain length {} exceeds limit {}",
                unit_chain_len, max_chain_depth
            )));
        }
        if self.secondary_chain().len() > max_chain_depth {
            return Err(ProofError::verification(format!(
                "secondary chain length {} exceeds limit {}",
                self.secondary_chain().len(),
                max_chain_depth
            )));
        }
        if self.block_header_hash.len() != algorithm.output_size() {
            return Err(ProofError::verification("block header hash has wrong width"));
        }
        if self.hash_value.len() != algorithm.output_size() {
            return Err(ProofError::verification("hash value has wrong width"));
        }

        let wants_secondary = self.proof_type == ProofType::Sec;
        if self.secondary_chain.is_some() != wants_secondary {
            return Err(ProofError::verification(format!(
                "secondary chain presence does not match {}",
                self.proof_type
            )));
        }

        match self.proof_type {
            ProofType::EmptyBlock => {
                if unit_chain_len != 0 {
                    return Err(ProofError::verification("empty block proof carries a unit chain"));
                }
            }
            ProofType::Prim | ProofType::Sec | ProofType::OnlySec | ProofType::NoTrans => {
                if unit_chain_len == 0 {
                    return Err(ProofError::verification(format!(
                        "{} proof has no unit chain",
                        self.proof_type
                    )));
                }
            }
        }

        if matches!(self.proof_type, ProofType::EmptyBlock | ProofType::NoTrans)
            && self.hash_value.iter().any(|b| *b != 0)
        {
            return Err(ProofError::verification(format!(
                "{} proof must carry the zero hash value",
                self.proof_type
            )));
        }

        Ok(())
    }
}
