//! # Inbound Ports
//!
//! API trait defining what the block proof subsystem offers its callers.

use shared_types::{Block, TrustBase, UnitId, UnitTransaction};

use crate::domain::{BlockProof, ProofConfig, ProofError};

/// Block proof API - inbound port.
///
/// All operations are synchronous and pure: no I/O, no shared state.
pub trait BlockProofApi<T: UnitTransaction>: Send + Sync {
    /// Configuration shared by construction and verification.
    fn config(&self) -> &ProofConfig;

    /// Build an `EMPTYBLOCK`, `NOTRANS`, `PRIM`, or `ONLYSEC` proof for a unit.
    fn build_primary_proof(
        &self,
        block: &Block<T>,
        unit_id: &UnitId,
    ) -> Result<BlockProof, ProofError>;

    /// Build a `SEC` proof for the unit's secondary transaction at `index`.
    fn build_secondary_proof(
        &self,
        block: &Block<T>,
        unit_id: &UnitId,
        index: usize,
    ) -> Result<BlockProof, ProofError>;

    /// Build one proof per unit touched by the block.
    fn build_all_proofs(&self, block: &Block<T>) -> Result<Vec<(UnitId, BlockProof)>, ProofError>;

    /// Hash a block the way its certificate commits to it.
    fn block_hash(&self, block: &Block<T>) -> Result<Vec<u8>, ProofError>;

    /// Verify a proof for a candidate transaction.
    ///
    /// # Errors
    ///
    /// - `Input(MissingVerifiers)`: empty trust base
    /// - `InvalidCertificate`: certificate rejected by the trust base
    /// - `ProofVerificationFailed`: any recomputed hash mismatch
    fn verify(&self, tx: &T, proof: &BlockProof, trust_base: &TrustBase) -> Result<(), ProofError>;

    /// [`BlockProofApi::build_primary_proof`] for a unit key given as raw bytes.
    ///
    /// Fails with `Input(InvalidUnitId)` unless `unit_key` is 32 bytes.
    fn build_proof_for_key(
        &self,
        block: &Block<T>,
        unit_key: &[u8],
    ) -> Result<BlockProof, ProofError> {
        let unit_id = UnitId::try_from(unit_key)?;
        self.build_primary_proof(block, &unit_id)
    }
}
