//! # QC-03 Block Proofs
//!
//! Compact proofs that a transaction was included in, or a unit was absent
//! from, a certified block.
//!
//! **Subsystem ID:** 3  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Structure
//!
//! Every block commits to a two-level Merkle structure:
//!
//! ```text
//! block_hash = H(header_hash || omt_root)
//!                                  │
//!              ordered tree over units, sorted by 256-bit unit id
//!                                  │
//!              unit_hash = H(primary_hash || secondary_root)
//!                                                   │
//!                      index-addressed tree over the unit's secondaries
//! ```
//!
//! The block hash is certified by a unicity certificate issued elsewhere.
//! Proofs carry one path through each level plus the certificate.
//!
//! ## Proof Types
//!
//! | Type | Wire | Proves |
//! |------|------|--------|
//! | PRIM | 0 | Primary transaction of a unit |
//! | SEC | 1 | One secondary transaction of a unit |
//! | ONLYSEC | 2 | Unit touched only by secondaries |
//! | NOTRANS | 3 | Unit not touched by the block |
//! | EMPTYBLOCK | 4 | Block has no transactions |
//!
//! ## Module Structure
//!
//! ```text
//! qc-03-block-proofs/
//! ├── domain/          # Trees, hashers, extractor, BlockProof, errors, config
//! ├── algorithms/      # ProofBuilder, ProofVerifier
//! ├── ports/           # BlockProofApi (inbound)
//! └── application/     # BlockProofService
//! ```

#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use algorithms::{ProofBuilder, ProofVerifier};
pub use application::BlockProofService;
pub use domain::{
    block_hash, block_header_hash, extract_identifiers, extract_transactions, hash_tx,
    secondary_root, unit_hash, BlockProof, ChainItem, InputError, MerkleLeaf, OrderedMerkleTree,
    ProofConfig, ProofError, ProofErrorKind, ProofType, SecondaryMerkleTree, SecondaryPathItem,
    UnitTransactions, DEFAULT_MAX_CHAIN_DEPTH,
};
pub use ports::BlockProofApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
