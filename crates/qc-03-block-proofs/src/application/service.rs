//! # Block Proof Service
//!
//! Application service wiring the builder and verifier behind
//! [`BlockProofApi`].

use shared_types::{Block, TrustBase, UnitId, UnitTransaction};

use crate::algorithms::{ProofBuilder, ProofVerifier};
use crate::domain::{block_hash, BlockProof, ProofConfig, ProofError};
use crate::ports::BlockProofApi;

/// Block proof service. Holds configuration only; safe to share across threads.
#[derive(Debug, Clone)]
pub struct BlockProofService {
    config: ProofConfig,
    builder: ProofBuilder,
    verifier: ProofVerifier,
}

impl BlockProofService {
    /// Create a service; builder and verifier share `config`.
    pub fn new(config: ProofConfig) -> Self {
        Self {
            builder: ProofBuilder::new(config.clone()),
            verifier: ProofVerifier::new(config.clone()),
            config,
        }
    }

    /// Create a service for testing.
    pub fn for_testing() -> Self {
        Self::new(ProofConfig::for_testing())
    }

    pub fn builder(&self) -> &ProofBuilder {
        &self.builder
    }

    pub fn verifier(&self) -> &ProofVerifier {
        &self.verifier
    }
}

impl Default for BlockProofService {
    fn default() -> Self {
        Self::new(ProofConfig::default())
    }
}

impl<T: UnitTransaction> BlockProofApi<T> for BlockProofService {
    fn config(&self) -> &ProofConfig {
        &self.config
    }

    fn build_primary_proof(
        &self,
        block: &Block<T>,
        unit_id: &UnitId,
    ) -> Result<BlockProof, ProofError> {
        self.builder.build_primary_proof(block, unit_id)
    }

    fn build_secondary_proof(
        &self,
        block: &Block<T>,
        unit_id: &UnitId,
        index: usize,
    ) -> Result<BlockProof, ProofError> {
        self.builder.build_secondary_proof(block, unit_id, index)
    }

    fn build_all_proofs(&self, block: &Block<T>) -> Result<Vec<(UnitId, BlockProof)>, ProofError> {
        self.builder.build_all(block)
    }

    fn block_hash(&self, block: &Block<T>) -> Result<Vec<u8>, ProofError> {
        block_hash(block, self.config.hash_algorithm)
    }

    fn verify(&self, tx: &T, proof: &BlockProof, trust_base: &TrustBase) -> Result<(), ProofError> {
        self.verifier.verify(tx, proof, trust_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InputError, ProofType};
    use shared_crypto::HashAlgorithm;
    use shared_types::{
        SystemIdentifier, TransactionKind, TransactionOrder, UnicityCertificate,
    };

    fn block() -> Block {
        Block {
            system_identifier: SystemIdentifier([0, 0, 0, 2]),
            block_number: 9,
            previous_block_hash: vec![0u8; 32],
            transactions: vec![TransactionOrder::new(
                SystemIdentifier([0, 0, 0, 2]),
                UnitId::from(77),
                TransactionKind::Swap,
                Vec::new(),
                true,
            )],
            unicity_certificate: UnicityCertificate::default(),
        }
    }

    #[test]
    fn test_service_shares_config() {
        let service = BlockProofService::new(ProofConfig::with_algorithm(HashAlgorithm::Sha512));
        let api: &dyn BlockProofApi<TransactionOrder> = &service;
        assert_eq!(api.config().hash_algorithm, HashAlgorithm::Sha512);
        assert_eq!(service.builder().config(), service.verifier().config());
    }

    #[test]
    fn test_build_through_port() {
        let service = BlockProofService::for_testing();
        let proof = service.build_primary_proof(&block(), &UnitId::from(77)).unwrap();
        assert_eq!(proof.proof_type, ProofType::Prim);
    }

    #[test]
    fn test_build_for_raw_key() {
        let service = BlockProofService::for_testing();
        let key = UnitId::from(77);
        let proof = service.build_proof_for_key(&block(), key.as_bytes()).unwrap();
        assert_eq!(proof.proof_type, ProofType::Prim);

        assert_eq!(
            service.build_proof_for_key(&block(), &[1, 2, 3]),
            Err(ProofError::Input(InputError::InvalidUnitId { len: 3 }))
        );
    }

    #[test]
    fn test_verify_requires_verifiers() {
        let service = BlockProofService::for_testing();
        let b = block();
        let proof = service.build_primary_proof(&b, &UnitId::from(77)).unwrap();
        assert_eq!(
            service.verify(&b.transactions[0], &proof, &TrustBase::new()),
            Err(ProofError::Input(InputError::MissingVerifiers))
        );
    }
}
