//! # Ordered Merkle Tree
//!
//! Merkle tree over unit hashes whose leaves are sorted by 256-bit unit key.
//! Supports inclusion paths for present keys and neighbor-anchored exclusion
//! paths for absent keys.
//!
//! ## Shape
//!
//! A run of `n` sorted leaves is split into `ceil(n/2)` left and `floor(n/2)`
//! right leaves, recursively. Each branch records a separator key: the
//! largest key in its left subtree.
//!
//! ```text
//!            [k2 | H(L || R)]
//!           /                \
//!   [k1 | H(a || b)]       [k3 | H(c || d)]
//!     /        \             /        \
//!   (k1,a)   (k2,b)       (k3,c)    (k4,d)
//! ```
//!
//! ## Paths
//!
//! Element 0 of a path is the leaf the query lands on. Every following
//! element pairs a branch separator with the sibling subtree hash, leaf to
//! root. The verifier never sees explicit directions: at each level the
//! current hash is the left operand iff `anchor_key <= separator`, where the
//! anchor key is element 0's key. This matches construction because a leaf
//! sits in a branch's left subtree exactly when its key is at most the
//! separator.

use serde::{Deserialize, Serialize};
use shared_crypto::HashAlgorithm;
use shared_types::UnitId;

/// Input leaf for OMT construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleLeaf {
    pub key: UnitId,
    pub hash: Vec<u8>,
}

/// One step of a unit chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainItem {
    pub key: UnitId,
    pub hash: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Leaf {
        key: UnitId,
        hash: Vec<u8>,
    },
    Branch {
        separator: UnitId,
        hash: Vec<u8>,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn hash(&self) -> &[u8] {
        match self {
            Node::Leaf { hash, .. } | Node::Branch { hash, .. } => hash,
        }
    }

    fn build(leaves: &[MerkleLeaf], algorithm: HashAlgorithm) -> Self {
        if let [leaf] = leaves {
            return Node::Leaf {
                key: leaf.key,
                hash: leaf.hash.clone(),
            };
        }

        let left_len = (leaves.len() + 1) / 2;
        let left = Node::build(&leaves[..left_len], algorithm);
        let right = Node::build(&leaves[left_len..], algorithm);
        let hash = algorithm.digest_concat(&[left.hash(), right.hash()]);

        Node::Branch {
            separator: leaves[left_len - 1].key,
            hash,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Immutable ordered Merkle tree. Rebuilt per block; never updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMerkleTree {
    root: Option<Node>,
    algorithm: HashAlgorithm,
    leaf_count: usize,
}

impl OrderedMerkleTree {
    /// Build from leaves sorted ascending by key with no duplicates.
    ///
    /// Ordering is a caller contract and is not re-checked here.
    pub fn build(leaves: &[MerkleLeaf], algorithm: HashAlgorithm) -> Self {
        let root = if leaves.is_empty() {
            None
        } else {
            Some(Node::build(leaves, algorithm))
        };

        tracing::debug!(leaves = leaves.len(), "built ordered merkle tree");

        Self {
            root,
            algorithm,
            leaf_count: leaves.len(),
        }
    }

    /// Root hash; the all-zero hash for an empty tree.
    pub fn root_hash(&self) -> Vec<u8> {
        match &self.root {
            Some(node) => node.hash().to_vec(),
            None => self.algorithm.zero_hash(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Path for `key`, leaf first.
    ///
    /// For an absent key, element 0 is the leaf a search for `key` ends on,
    /// which is one of its sorted neighbors. An empty tree yields an empty path.
    pub fn path(&self, key: &UnitId) -> Vec<ChainItem> {
        let mut siblings = Vec::new();
        let mut node = match &self.root {
            Some(node) => node,
            None => return siblings,
        };

        loop {
            match node {
                Node::Branch {
                    separator,
                    left,
                    right,
                    ..
                } => {
                    if key <= separator {
                        siblings.push(ChainItem {
                            key: *separator,
                            hash: right.hash().to_vec(),
                        });
                        node = &**left;
                    } else {
                        siblings.push(ChainItem {
                            key: *separator,
                            hash: left.hash().to_vec(),
                        });
                        node = &**right;
                    }
                }
                Node::Leaf {
                    key: leaf_key,
                    hash,
                } => {
                    siblings.push(ChainItem {
                        key: *leaf_key,
                        hash: hash.clone(),
                    });
                    break;
                }
            }
        }

        siblings.reverse();
        siblings
    }

    /// Re-derive the root from a path.
    ///
    /// An empty path evaluates to the all-zero hash, the root of an empty tree.
    pub fn eval_path(path: &[ChainItem], algorithm: HashAlgorithm) -> Vec<u8> {
        let (anchor, siblings) = match path.split_first() {
            Some(split) => split,
            None => return algorithm.zero_hash(),
        };

        let mut current = anchor.hash.clone();
        for item in siblings {
            current = if anchor.key <= item.key {
                algorithm.digest_concat(&[&current, &item.hash])
            } else {
                algorithm.digest_concat(&[&item.hash, &current])
            };
        }
        current
    }

    /// True iff `path` shows that `key` is not a leaf of the tree it evaluates to.
    ///
    /// The anchor leaf must differ from `key`, and at every level `key` must
    /// fall on the same side of the separator as the anchor, so a search for
    /// `key` would have ended on the anchor.
    pub fn proves_absence(path: &[ChainItem], key: &UnitId) -> bool {
        let (anchor, siblings) = match path.split_first() {
            Some(split) => split,
            None => return false,
        };

        anchor.key != *key
            && siblings
                .iter()
                .all(|item| (*key <= item.key) == (anchor.key <= item.key))
    }
}
