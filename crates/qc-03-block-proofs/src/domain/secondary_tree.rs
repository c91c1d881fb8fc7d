//! # Secondary Merkle Tree
//!
//! Index-addressed binary Merkle tree over one unit's secondary
//! transactions, in block order.
//!
//! ## Invariants
//!
//! - Leaves are padded to the next power of two (minimum 2) with the
//!   all-zero hash of the configured algorithm.
//! - A tree with no leaves has the all-zero hash as root.
//! - Every internal node is H(left || right).

use serde::{Deserialize, Serialize};
use shared_crypto::HashAlgorithm;

use super::errors::{InputError, ProofError};

/// One step of a secondary chain, leaf to root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryPathItem {
    /// True if `hash` is the left operand at this level.
    pub is_left_sibling: bool,
    /// Sibling hash.
    pub hash: Vec<u8>,
}

/// Binary Merkle tree stored in array form: `[root, level1.., leaves..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryMerkleTree {
    nodes: Vec<Vec<u8>>,
    /// Number of real leaves (before padding).
    leaf_count: usize,
    /// Number of leaves after padding.
    padded_leaf_count: usize,
}

impl SecondaryMerkleTree {
    /// Build a tree over leaf hashes in the given order.
    pub fn build(leaves: Vec<Vec<u8>>, algorithm: HashAlgorithm) -> Self {
        let leaf_count = leaves.len();

        if leaf_count == 0 {
            return Self {
                nodes: vec![algorithm.zero_hash()],
                leaf_count: 0,
                padded_leaf_count: 0,
            };
        }

        let padded_leaf_count = if leaf_count == 1 {
            2
        } else {
            leaf_count.next_power_of_two()
        };

        // Parent at index i has children at 2i+1 and 2i+2
        let leaf_start = padded_leaf_count - 1;
        let mut nodes = vec![algorithm.zero_hash(); 2 * padded_leaf_count - 1];
        for (i, hash) in leaves.into_iter().enumerate() {
            nodes[leaf_start + i] = hash;
        }
        for i in (0..leaf_start).rev() {
            nodes[i] = algorithm.digest_concat(&[&nodes[2 * i + 1], &nodes[2 * i + 2]]);
        }

        Self {
            nodes,
            leaf_count,
            padded_leaf_count,
        }
    }

    /// Root hash.
    pub fn root_hash(&self) -> &[u8] {
        &self.nodes[0]
    }

    /// Number of real leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of leaves after padding.
    pub fn padded_leaf_count(&self) -> usize {
        self.padded_leaf_count
    }

    /// Sibling path from leaf `index` up to the root.
    pub fn path(&self, index: usize) -> Result<Vec<SecondaryPathItem>, ProofError> {
        if index >= self.leaf_count {
            return Err(InputError::SecondaryIndexOutOfRange {
                index,
                count: self.leaf_count,
            }
            .into());
        }

        let mut current = self.padded_leaf_count - 1 + index;
        let mut path = Vec::new();
        while current > 0 {
            // Right children sit at even indices
            let is_left_sibling = current % 2 == 0;
            let sibling = if is_left_sibling {
                current - 1
            } else {
                current + 1
            };
            path.push(SecondaryPathItem {
                is_left_sibling,
                hash: self.nodes[sibling].clone(),
            });
            current = (current - 1) / 2;
        }
        Ok(path)
    }

    /// Recompute the root from a leaf hash and its path.
    pub fn eval_path(
        leaf_hash: &[u8],
        path: &[SecondaryPathItem],
        algorithm: HashAlgorithm,
    ) -> Vec<u8> {
        let mut current = leaf_hash.to_vec();
        for item in path {
            current = if item.is_left_sibling {
                algorithm.digest_concat(&[&item.hash, &current])
            } else {
                algorithm.digest_concat(&[&current, &item.hash])
            };
        }
        current
    }
}
