//! # Proof Builder
//!
//! Assembles block proofs from a block and a unit id.
//!
//! ## Selection (evaluated in order)
//!
//! 1. Block has no transactions → `EMPTYBLOCK`
//! 2. Unit not touched by the block → `NOTRANS`
//! 3. Unit has a primary → `PRIM`
//! 4. Otherwise → `ONLYSEC`
//!
//! `SEC` has its own entry point, [`ProofBuilder::build_secondary_proof`].

use std::collections::BTreeMap;

use shared_crypto::HashAlgorithm;
use shared_types::{Block, UnitId, UnitTransaction};

use crate::domain::{
    block_header_hash, group_by_unit, hash_tx, secondary_root, secondary_tree, unit_leaves,
    BlockProof, OrderedMerkleTree, ProofConfig, ProofError, ProofType, UnitTransactions,
};

/// Per-block state shared by every proof built from one block.
struct BlockContext<'a, T> {
    header_hash: Vec<u8>,
    units: BTreeMap<UnitId, UnitTransactions<'a, T>>,
    tree: OrderedMerkleTree,
}

impl<'a, T: UnitTransaction> BlockContext<'a, T> {
    fn new(block: &'a Block<T>, algorithm: HashAlgorithm) -> Result<Self, ProofError> {
        let units = group_by_unit(&block.transactions)?;
        let leaves = unit_leaves(&units, algorithm)?;
        Ok(Self {
            header_hash: block_header_hash(block, algorithm),
            tree: OrderedMerkleTree::build(&leaves, algorithm),
            units,
        })
    }
}

/// Builds proofs. Holds configuration only; trees are rebuilt per call.
#[derive(Debug, Clone, Default)]
pub struct ProofBuilder {
    config: ProofConfig,
}

impl ProofBuilder {
    pub fn new(config: ProofConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    fn algorithm(&self) -> HashAlgorithm {
        self.config.hash_algorithm
    }

    /// Proof for `unit_id`: `EMPTYBLOCK`, `NOTRANS`, `PRIM`, or `ONLYSEC`.
    pub fn build_primary_proof<T: UnitTransaction>(
        &self,
        block: &Block<T>,
        unit_id: &UnitId,
    ) -> Result<BlockProof, ProofError> {
        if block.is_empty() {
            return Ok(self.empty_block_proof(block));
        }
        let ctx = BlockContext::new(block, self.algorithm())?;
        self.unit_proof(block, &ctx, unit_id)
    }

    /// `SEC` proof for the secondary transaction at `index` among the unit's
    /// secondaries, in block order.
    ///
    /// Empty blocks and untouched units still yield `EMPTYBLOCK` / `NOTRANS`.
    pub fn build_secondary_proof<T: UnitTransaction>(
        &self,
        block: &Block<T>,
        unit_id: &UnitId,
        index: usize,
    ) -> Result<BlockProof, ProofError> {
        if block.is_empty() {
            return Ok(self.empty_block_proof(block));
        }
        let algorithm = self.algorithm();
        let ctx = BlockContext::new(block, algorithm)?;
        let unit = match ctx.units.get(unit_id) {
            Some(unit) => unit,
            None => return Ok(self.no_trans_proof(block, &ctx, unit_id)),
        };

        let secondary_chain = secondary_tree(&unit.secondaries, algorithm)?.path(index)?;

        tracing::debug!(
            unit = %unit_id,
            index,
            secondaries = unit.secondaries.len(),
            "built SEC proof"
        );

        Ok(BlockProof {
            proof_type: ProofType::Sec,
            block_header_hash: ctx.header_hash.clone(),
            hash_value: hash_tx(unit.primary, algorithm)?,
            unit_chain: Some(ctx.tree.path(unit_id)),
            secondary_chain: Some(secondary_chain),
            unicity_certificate: block.unicity_certificate.clone(),
        })
    }

    /// One proof per unit touched by `block`, in ascending unit order.
    ///
    /// The unit tree is built once for the whole batch.
    pub fn build_all<T: UnitTransaction>(
        &self,
        block: &Block<T>,
    ) -> Result<Vec<(UnitId, BlockProof)>, ProofError> {
        let ctx = BlockContext::new(block, self.algorithm())?;
        ctx.units
            .keys()
            .map(|unit_id| -> Result<(UnitId, BlockProof), ProofError> {
                Ok((*unit_id, self.unit_proof(block, &ctx, unit_id)?))
            })
            .collect()
    }

    fn unit_proof<T: UnitTransaction>(
        &self,
        block: &Block<T>,
        ctx: &BlockContext<'_, T>,
        unit_id: &UnitId,
    ) -> Result<BlockProof, ProofError> {
        let unit = match ctx.units.get(unit_id) {
            Some(unit) => unit,
            None => return Ok(self.no_trans_proof(block, ctx, unit_id)),
        };

        let proof_type = if unit.primary.is_some() {
            ProofType::Prim
        } else {
            ProofType::OnlySec
        };

        tracing::debug!(
            unit = %unit_id,
            proof_type = %proof_type,
            units = ctx.tree.leaf_count(),
            "selected proof type"
        );

        Ok(BlockProof {
            proof_type,
            block_header_hash: ctx.header_hash.clone(),
            hash_value: secondary_root(&unit.secondaries, self.algorithm())?,
            unit_chain: Some(ctx.tree.path(unit_id)),
            secondary_chain: None,
            unicity_certificate: block.unicity_certificate.clone(),
        })
    }

    fn no_trans_proof<T>(
        &self,
        block: &Block<T>,
        ctx: &BlockContext<'_, T>,
        unit_id: &UnitId,
    ) -> BlockProof {
        tracing::debug!(unit = %unit_id, "unit not in block, building NOTRANS proof");
        BlockProof {
            proof_type: ProofType::NoTrans,
            block_header_hash: ctx.header_hash.clone(),
            hash_value: self.algorithm().zero_hash(),
            unit_chain: Some(ctx.tree.path(unit_id)),
            secondary_chain: None,
            unicity_certificate: block.unicity_certificate.clone(),
        }
    }

    fn empty_block_proof<T>(&self, block: &Block<T>) -> BlockProof {
        tracing::debug!(block_number = block.block_number, "empty block, building EMPTYBLOCK proof");
        let algorithm = self.algorithm();
        BlockProof {
            proof_type: ProofType::EmptyBlock,
            block_header_hash: block_header_hash(block, algorithm),
            hash_value: algorithm.zero_hash(),
            unit_chain: None,
            secondary_chain: None,
            unicity_certificate: block.unicity_certificate.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{block_hash, InputError};
    use shared_types::{SystemIdentifier, TransactionKind, TransactionOrder, UnicityCertificate};

    fn tx(unit: u64, primary: bool, tag: u8) -> TransactionOrder {
        TransactionOrder::new(
            SystemIdentifier([0, 0, 0, 0]),
            UnitId::from(unit),
            TransactionKind::Transfer,
            vec![tag],
            primary,
        )
    }

    fn block(transactions: Vec<TransactionOrder>) -> Block {
        Block {
            system_identifier: SystemIdentifier([0, 0, 0, 0]),
            block_number: 1,
            previous_block_hash: vec![0u8; 32],
            transactions,
            unicity_certificate: UnicityCertificate::default(),
        }
    }

    fn builder() -> ProofBuilder {
        ProofBuilder::new(ProofConfig::for_testing())
    }

    // ========== Test Group 1: Type Selection ==========

    #[test]
    fn test_empty_block_yields_emptyblock() {
        let proof = builder()
            .build_primary_proof(&block(Vec::new()), &UnitId::from(1))
            .unwrap();
        assert_eq!(proof.proof_type, ProofType::EmptyBlock);
        assert!(proof.unit_chain.is_none());
        assert!(proof.secondary_chain.is_none());
        assert_eq!(proof.hash_value, vec![0u8; 32]);
    }

    #[test]
    fn test_absent_unit_yields_notrans() {
        let proof = builder()
            .build_primary_proof(&block(vec![tx(1, true, 0)]), &UnitId::from(2))
            .unwrap();
        assert_eq!(proof.proof_type, ProofType::NoTrans);
        assert_eq!(proof.hash_value, vec![0u8; 32]);
        assert_eq!(proof.unit_chain()[0].key, UnitId::from(1));
    }

    #[test]
    fn test_primary_unit_yields_prim() {
        let b = block(vec![tx(1, false, 0), tx(1, true, 1)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        assert_eq!(proof.proof_type, ProofType::Prim);
        assert_eq!(
            proof.hash_value,
            secondary_root(&[&b.transactions[0]], HashAlgorithm::Sha256).unwrap()
        );
    }

    #[test]
    fn test_secondary_only_unit_yields_onlysec() {
        let b = block(vec![tx(1, false, 0), tx(1, false, 1)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        assert_eq!(proof.proof_type, ProofType::OnlySec);
    }

    #[test]
    fn test_header_hash_and_certificate_attached() {
        let mut b = block(vec![tx(1, true, 0)]);
        b.unicity_certificate.input_record.block_hash = vec![9u8; 32];
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        assert_eq!(
            proof.block_header_hash,
            block_header_hash(&b, HashAlgorithm::Sha256)
        );
        assert_eq!(proof.unicity_certificate, b.unicity_certificate);
    }

    #[test]
    fn test_chain_reconstructs_block_hash() {
        let b = block(vec![tx(1, true, 0), tx(2, false, 1), tx(3, true, 2)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(2)).unwrap();
        let root = OrderedMerkleTree::eval_path(proof.unit_chain(), HashAlgorithm::Sha256);
        let recomputed = HashAlgorithm::Sha256.digest_concat(&[&proof.block_header_hash, &root]);
        assert_eq!(recomputed, block_hash(&b, HashAlgorithm::Sha256).unwrap());
    }

    #[test]
    fn test_duplicate_primary_rejected() {
        let b = block(vec![tx(1, true, 0), tx(1, true, 1)]);
        assert_eq!(
            builder().build_primary_proof(&b, &UnitId::from(1)),
            Err(ProofError::Input(InputError::DuplicatePrimary {
                unit_id: UnitId::from(1)
            }))
        );
    }

    // ========== Test Group 2: Secondary Proofs ==========

    #[test]
    fn test_secondary_proof_fields() {
        let b = block(vec![tx(1, false, 0), tx(1, true, 1), tx(1, false, 2)]);
        let proof = builder()
            .build_secondary_proof(&b, &UnitId::from(1), 1)
            .unwrap();
        assert_eq!(proof.proof_type, ProofType::Sec);
        assert_eq!(
            proof.hash_value,
            b.transactions[1].hash(HashAlgorithm::Sha256).unwrap()
        );
        assert_eq!(proof.secondary_chain().len(), 1);
    }

    #[test]
    fn test_secondary_proof_without_primary_uses_zero_hash() {
        let b = block(vec![tx(1, false, 0)]);
        let proof = builder()
            .build_secondary_proof(&b, &UnitId::from(1), 0)
            .unwrap();
        assert_eq!(proof.hash_value, vec![0u8; 32]);
    }

    #[test]
    fn test_secondary_index_out_of_range() {
        let b = block(vec![tx(1, true, 0), tx(1, false, 1)]);
        assert_eq!(
            builder().build_secondary_proof(&b, &UnitId::from(1), 1),
            Err(ProofError::Input(InputError::SecondaryIndexOutOfRange {
                index: 1,
                count: 1
            }))
        );
    }

    #[test]
    fn test_secondary_entry_point_falls_back_for_absent_unit() {
        let b = block(vec![tx(1, true, 0)]);
        let proof = builder()
            .build_secondary_proof(&b, &UnitId::from(5), 0)
            .unwrap();
        assert_eq!(proof.proof_type, ProofType::NoTrans);

        let empty = block(Vec::new());
        let proof = builder()
            .build_secondary_proof(&empty, &UnitId::from(5), 0)
            .unwrap();
        assert_eq!(proof.proof_type, ProofType::EmptyBlock);
    }

    // ========== Test Group 3: Batch ==========

    #[test]
    fn test_build_all_matches_single_builds() {
        let b = block(vec![tx(4, true, 0), tx(2, false, 1), tx(4, false, 2), tx(9, true, 3)]);
        let all = builder().build_all(&b).unwrap();
        let units: Vec<UnitId> = all.iter().map(|(u, _)| *u).collect();
        assert_eq!(units, vec![UnitId::from(2), UnitId::from(4), UnitId::from(9)]);
        for (unit_id, proof) in &all {
            assert_eq!(proof, &builder().build_primary_proof(&b, unit_id).unwrap());
        }
    }

    #[test]
    fn test_build_all_empty_block() {
        assert!(builder().build_all(&block(Vec::new())).unwrap().is_empty());
    }
}
