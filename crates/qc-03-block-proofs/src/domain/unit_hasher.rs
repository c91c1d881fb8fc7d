//! # Unit Hasher
//!
//! Hashes transactions, a unit's secondary tree, and the combined unit hash
//! that becomes the unit's leaf in the ordered tree.
//!
//! Operand order is fixed: `unit_hash = H(primary_hash || secondary_root)`.

use std::collections::BTreeMap;

use shared_crypto::HashAlgorithm;
use shared_types::{UnitId, UnitTransaction};

use super::errors::ProofError;
use super::omt::{MerkleLeaf, OrderedMerkleTree};
use super::secondary_tree::SecondaryMerkleTree;
use super::unit_extractor::{group_by_unit, UnitTransactions};

/// H(canonical bytes) of `tx`, or the all-zero hash when there is none.
pub fn hash_tx<T: UnitTransaction>(
    tx: Option<&T>,
    algorithm: HashAlgorithm,
) -> Result<Vec<u8>, ProofError> {
    match tx {
        Some(tx) => Ok(tx.hash(algorithm)?),
        None => Ok(algorithm.zero_hash()),
    }
}

/// Secondary tree over `secondaries` in the given order.
pub fn secondary_tree<T: UnitTransaction>(
    secondaries: &[&T],
    algorithm: HashAlgorithm,
) -> Result<SecondaryMerkleTree, ProofError> {
    let leaves = secondaries
        .iter()
        .map(|tx| tx.hash(algorithm))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SecondaryMerkleTree::build(leaves, algorithm))
}

/// Root of the secondary tree; the all-zero hash when there are none.
pub fn secondary_root<T: UnitTransaction>(
    secondaries: &[&T],
    algorithm: HashAlgorithm,
) -> Result<Vec<u8>, ProofError> {
    Ok(secondary_tree(secondaries, algorithm)?.root_hash().to_vec())
}

/// H(primary_hash || secondary_root).
pub fn unit_hash(primary_hash: &[u8], secondary_root: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    algorithm.digest_concat(&[primary_hash, secondary_root])
}

/// Unit hash for one unit's transactions.
pub fn hash_unit<T: UnitTransaction>(
    unit: &UnitTransactions<'_, T>,
    algorithm: HashAlgorithm,
) -> Result<Vec<u8>, ProofError> {
    let primary = hash_tx(unit.primary, algorithm)?;
    let secondary = secondary_root(&unit.secondaries, algorithm)?;
    Ok(unit_hash(&primary, &secondary, algorithm))
}

/// Sorted OMT leaves for grouped units.
pub fn unit_leaves<T: UnitTransaction>(
    groups: &BTreeMap<UnitId, UnitTransactions<'_, T>>,
    algorithm: HashAlgorithm,
) -> Result<Vec<MerkleLeaf>, ProofError> {
    groups
        .iter()
        .map(|(unit_id, unit)| -> Result<MerkleLeaf, ProofError> {
            Ok(MerkleLeaf {
                key: *unit_id,
                hash: hash_unit(unit, algorithm)?,
            })
        })
        .collect()
}

/// Ordered unit tree over every unit touched by `txs`.
pub fn build_unit_tree<T: UnitTransaction>(
    txs: &[T],
    algorithm: HashAlgorithm,
) -> Result<OrderedMerkleTree, ProofError> {
    let groups = group_by_unit(txs)?;
    let leaves = unit_leaves(&groups, algorithm)?;
    Ok(OrderedMerkleTree::build(&leaves, algorithm))
}
