//! # Block Header Hasher
//!
//! `header_hash = H(system_id || block_number (u64, big-endian) || previous_block_hash)`
//!
//! `block_hash = H(header_hash || unit_tree_root)` is the value a unicity
//! certificate commits to.

use shared_crypto::HashAlgorithm;
use shared_types::{Block, UnitTransaction};

use super::errors::ProofError;
use super::unit_hasher::build_unit_tree;

/// Hash of the header fields of `block`.
pub fn block_header_hash<T>(block: &Block<T>, algorithm: HashAlgorithm) -> Vec<u8> {
    let mut hasher = algorithm.hasher();
    hasher
        .update(block.system_identifier.as_bytes())
        .update(&block.block_number.to_be_bytes())
        .update(&block.previous_block_hash);
    hasher.finalize()
}

/// H(header_hash || unit_tree_root).
pub fn combine_block_hash(
    header_hash: &[u8],
    unit_tree_root: &[u8],
    algorithm: HashAlgorithm,
) -> Vec<u8> {
    algorithm.digest_concat(&[header_hash, unit_tree_root])
}

/// Block hash committed by the block's certificate.
pub fn block_hash<T: UnitTransaction>(
    block: &Block<T>,
    algorithm: HashAlgorithm,
) -> Result<Vec<u8>, ProofError> {
    let tree = build_unit_tree(&block.transactions, algorithm)?;
    Ok(combine_block_hash(
        &block_header_hash(block, algorithm),
        &tree.root_hash(),
        algorithm,
    ))
}
