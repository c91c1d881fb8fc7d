//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Units**: `UnitId`, `SystemIdentifier`
//! - **Transactions**: `UnitTransaction`, `TransactionOrder`, `TransactionKind`
//! - **Blocks**: `Block`

use serde::{Deserialize, Serialize};
use shared_crypto::HashAlgorithm;
use std::fmt;

use crate::certificate::UnicityCertificate;
use crate::errors::TypesError;

// Re-export U256 from primitive-types for callers working with numeric unit ids
pub use primitive_types::U256;

/// Width of a canonical unit key in bytes.
pub const UNIT_ID_LENGTH: usize = 32;

// =============================================================================
// CLUSTER A: UNITS
// =============================================================================

/// A 256-bit unit identifier in canonical big-endian form.
///
/// Byte-wise ordering of fixed-width big-endian arrays equals numeric
/// ordering, so the derived `Ord` is the key order of the unit tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct UnitId(pub [u8; UNIT_ID_LENGTH]);

impl UnitId {
    /// Canonical key bytes.
    pub fn as_bytes(&self) -> &[u8; UNIT_ID_LENGTH] {
        &self.0
    }

    /// Numeric value of this id.
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }
}

impl From<[u8; UNIT_ID_LENGTH]> for UnitId {
    fn from(bytes: [u8; UNIT_ID_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<U256> for UnitId {
    fn from(value: U256) -> Self {
        let mut bytes = [0u8; UNIT_ID_LENGTH];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }
}

impl From<u64> for UnitId {
    fn from(value: u64) -> Self {
        Self::from(U256::from(value))
    }
}

impl TryFrom<&[u8]> for UnitId {
    type Error = TypesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; UNIT_ID_LENGTH] = bytes
            .try_into()
            .map_err(|_| TypesError::InvalidUnitIdLength(bytes.len()))?;
        Ok(Self(raw))
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Identifier of a partition (transaction system) in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SystemIdentifier(pub [u8; 4]);

impl SystemIdentifier {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for SystemIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// =============================================================================
// CLUSTER B: TRANSACTIONS
// =============================================================================

/// Capabilities the proof engine needs from a transaction.
///
/// Implemented per transaction kind. Implementors must be immutable once
/// constructed: `hash` is recomputed on every call and must always agree
/// with `canonical_bytes`.
pub trait UnitTransaction {
    /// Unit this transaction targets.
    fn unit_id(&self) -> UnitId;

    /// Whether this transaction is the primary mutator of its unit.
    fn is_primary(&self) -> bool;

    /// Canonical serialization. Identical transactions MUST produce
    /// identical bytes.
    fn canonical_bytes(&self) -> Result<Vec<u8>, TypesError>;

    /// H(canonical_bytes).
    fn hash(&self, algorithm: HashAlgorithm) -> Result<Vec<u8>, TypesError> {
        Ok(algorithm.digest(&self.canonical_bytes()?))
    }
}

/// Kinds of transaction understood by the money partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Move a unit to a new owner.
    Transfer,
    /// Split value off a unit into a new unit.
    Split,
    /// Transfer a unit to the dust collector.
    TransferDustCollector,
    /// Swap dust-collected units into a target unit.
    Swap,
    /// Lock a unit.
    Lock,
    /// Partition-specific kind identified by number.
    Custom(u32),
}

/// A concrete, immutable transaction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOrder {
    /// Partition the order is addressed to.
    pub system_id: SystemIdentifier,
    /// Unit the order targets.
    pub unit_id: UnitId,
    /// What the order does.
    pub kind: TransactionKind,
    /// Kind-specific attributes, already encoded.
    pub attributes: Vec<u8>,
    /// Last round number in which the order may be executed.
    pub timeout: u64,
    /// Proof that the sender may spend the unit.
    pub owner_proof: Vec<u8>,
    /// Whether this order is the unit's primary mutation in its block.
    pub primary: bool,
}

impl TransactionOrder {
    /// Create an order with no timeout and an empty owner proof.
    pub fn new(
        system_id: SystemIdentifier,
        unit_id: UnitId,
        kind: TransactionKind,
        attributes: Vec<u8>,
        primary: bool,
    ) -> Self {
        Self {
            system_id,
            unit_id,
            kind,
            attributes,
            timeout: 0,
            owner_proof: Vec::new(),
            primary,
        }
    }
}

impl UnitTransaction for TransactionOrder {
    fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    fn is_primary(&self) -> bool {
        self.primary
    }

    fn canonical_bytes(&self) -> Result<Vec<u8>, TypesError> {
        bincode::serialize(self).map_err(|e| TypesError::Serialization(e.to_string()))
    }
}

// =============================================================================
// CLUSTER C: BLOCKS
// =============================================================================

/// A certified block, immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block<T = TransactionOrder> {
    /// Partition that produced the block.
    pub system_identifier: SystemIdentifier,
    /// Height of the block in its partition.
    pub block_number: u64,
    /// Hash of the previous block.
    pub previous_block_hash: Vec<u8>,
    /// Transactions in execution order.
    pub transactions: Vec<T>,
    /// Consensus commitment to this block.
    pub unicity_certificate: UnicityCertificate,
}

impl<T> Block<T> {
    /// True if the block carries no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
