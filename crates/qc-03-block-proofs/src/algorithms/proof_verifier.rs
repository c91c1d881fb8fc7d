//! # Proof Verifier
//!
//! Recomputes the hash chain from a candidate transaction and a proof, and
//! compares it against the certified block hash.
//!
//! # Algorithm
//!
//! 1. Validate the certificate against the trust base using the
//!    certificate's own system id and description hash
//! 2. Check the proof's shape against its type
//! 3. `block_hash = H(header_hash || eval(unit_chain))` must equal the
//!    certified block hash, for every proof type
//! 4. Recompute the unit hash for the proof type and compare with the
//!    chain's leaf
//!
//! Steps 2-4 fail with the single `ProofVerificationFailed` error.

use shared_crypto::HashAlgorithm;
use shared_types::{TrustBase, UnitTransaction};

use crate::domain::{
    combine_block_hash, hash_tx, unit_hash, BlockProof, InputError, OrderedMerkleTree,
    ProofConfig, ProofError, ProofType, SecondaryMerkleTree,
};

/// Verifies proofs. Stateless apart from its configuration.
#[derive(Debug, Clone, Default)]
pub struct ProofVerifier {
    config: ProofConfig,
}

impl ProofVerifier {
    pub fn new(config: ProofConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    /// Verify `proof` for the candidate transaction `tx`.
    ///
    /// For `NOTRANS` the candidate stands for the unit being shown absent;
    /// for `EMPTYBLOCK` only the block-level checks apply.
    pub fn verify<T: UnitTransaction>(
        &self,
        tx: &T,
        proof: &BlockProof,
        trust_base: &TrustBase,
    ) -> Result<(), ProofError> {
        if trust_base.is_empty() {
            return Err(InputError::MissingVerifiers.into());
        }

        let algorithm = self.config.hash_algorithm;
        let certificate = &proof.unicity_certificate;
        certificate.is_valid(
            trust_base,
            algorithm,
            certificate.system_identifier(),
            certificate.system_description_hash(),
        )?;

        let result = self.check_proof(tx, proof, algorithm);
        if let Err(err) = &result {
            tracing::warn!(
                unit = %tx.unit_id(),
                proof_type = %proof.proof_type,
                error = %err,
                "block proof rejected"
            );
        }
        result
    }

    /// Verify many `(transaction, proof)` pairs, stopping at the first failure.
    pub fn verify_all<'a, T, I>(&self, items: I, trust_base: &TrustBase) -> Result<(), ProofError>
    where
        T: UnitTransaction + 'a,
        I: IntoIterator<Item = (&'a T, &'a BlockProof)>,
    {
        for (tx, proof) in items {
            self.verify(tx, proof, trust_base)?;
        }
        Ok(())
    }

    fn check_proof<T: UnitTransaction>(
        &self,
        tx: &T,
        proof: &BlockProof,
        algorithm: HashAlgorithm,
    ) -> Result<(), ProofError> {
        proof.check_shape(algorithm, self.config.max_chain_depth)?;

        let chain = proof.unit_chain();
        let root = OrderedMerkleTree::eval_path(chain, algorithm);
        let computed = combine_block_hash(&proof.block_header_hash, &root, algorithm);
        let committed = proof.unicity_certificate.committed_block_hash();
        if computed != committed {
            return Err(ProofError::verification(format!(
                "block hash mismatch: expected {}, got {}",
                hex::encode(committed),
                hex::encode(&computed)
            )));
        }

        let unit_id = tx.unit_id();
        let expected_unit_hash = match proof.proof_type {
            ProofType::EmptyBlock => return Ok(()),
            ProofType::NoTrans => {
                if OrderedMerkleTree::proves_absence(chain, &unit_id) {
                    return Ok(());
                }
                return Err(ProofError::verification(format!(
                    "unit chain does not prove absence of unit {}",
                    unit_id
                )));
            }
            ProofType::Prim => {
                let primary = hash_tx(Some(tx), algorithm)?;
                unit_hash(&primary, &proof.hash_value, algorithm)
            }
            ProofType::Sec => {
                let leaf = hash_tx(Some(tx), algorithm)?;
                let secondary_root =
                    SecondaryMerkleTree::eval_path(&leaf, proof.secondary_chain(), algorithm);
                unit_hash(&proof.hash_value, &secondary_root, algorithm)
            }
            ProofType::OnlySec => unit_hash(&algorithm.zero_hash(), &proof.hash_value, algorithm),
        };

        // check_shape guarantees a non-empty chain for the remaining types
        let leaf = &chain[0];
        if leaf.key != unit_id {
            return Err(ProofError::verification(format!(
                "unit chain is for unit {}, not {}",
                leaf.key, unit_id
            )));
        }
        if leaf.hash != expected_unit_hash {
            return Err(ProofError::verification(format!(
                "unit hash mismatch: expected {}, got {}",
                hex::encode(&leaf.hash),
                hex::encode(&expected_unit_hash)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::ProofBuilder;
    use crate::domain::block_hash;
    use shared_crypto::Ed25519KeyPair;
    use shared_types::{
        Block, Ed25519Verifier, InputRecord, SystemIdentifier, TransactionKind, TransactionOrder,
        UnicityCertificate, UnitId,
    };
    use std::sync::Arc;

    const ALG: HashAlgorithm = HashAlgorithm::Sha256;
    const SYSTEM: SystemIdentifier = SystemIdentifier([0, 0, 0, 0]);

    fn key() -> Ed25519KeyPair {
        Ed25519KeyPair::from_seed([42u8; 32])
    }

    fn trust_base() -> TrustBase {
        TrustBase::new().with_verifier("root-1", Arc::new(Ed25519Verifier(key().public_key())))
    }

    fn tx(unit: u64, primary: bool, tag: u8) -> TransactionOrder {
        TransactionOrder::new(
            SYSTEM,
            UnitId::from(unit),
            TransactionKind::Transfer,
            vec![tag],
            primary,
        )
    }

    /// Block with a certificate signed over its real block hash.
    fn certified_block(transactions: Vec<TransactionOrder>) -> Block {
        let mut block = Block {
            system_identifier: SYSTEM,
            block_number: 3,
            previous_block_hash: vec![0x11; 32],
            transactions,
            unicity_certificate: UnicityCertificate::default(),
        };
        let input_record = InputRecord {
            previous_hash: vec![1; 32],
            hash: vec![2; 32],
            block_hash: block_hash(&block, ALG).unwrap(),
            summary_value: vec![3; 8],
        };
        let mut certificate =
            UnicityCertificate::new(input_record, SYSTEM, vec![0x5D; 32], 10, ALG);
        certificate.unicity_seal.sign("root-1", &key());
        block.unicity_certificate = certificate;
        block
    }

    fn builder() -> ProofBuilder {
        ProofBuilder::new(ProofConfig::for_testing())
    }

    fn verifier() -> ProofVerifier {
        ProofVerifier::new(ProofConfig::for_testing())
    }

    // ========== Test Group 1: Accepting ==========

    #[test]
    fn test_prim_proof_verifies() {
        let b = certified_block(vec![tx(1, true, 0), tx(1, false, 1), tx(2, true, 2)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        assert_eq!(verifier().verify(&b.transactions[0], &proof, &trust_base()), Ok(()));
    }

    #[test]
    fn test_onlysec_proof_verifies_with_any_unit_transaction() {
        let b = certified_block(vec![tx(1, false, 0), tx(1, false, 1)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        assert_eq!(proof.proof_type, ProofType::OnlySec);
        for t in &b.transactions {
            assert!(verifier().verify(t, &proof, &trust_base()).is_ok());
        }
    }

    #[test]
    fn test_sec_proof_verifies() {
        let b = certified_block(vec![tx(1, true, 0), tx(1, false, 1), tx(1, false, 2)]);
        let proof = builder()
            .build_secondary_proof(&b, &UnitId::from(1), 1)
            .unwrap();
        assert!(verifier().verify(&b.transactions[2], &proof, &trust_base()).is_ok());
    }

    #[test]
    fn test_notrans_proof_verifies() {
        let b = certified_block(vec![tx(10, true, 0), tx(20, true, 1)]);
        let absent = tx(15, true, 9);
        let proof = builder().build_primary_proof(&b, &UnitId::from(15)).unwrap();
        assert!(verifier().verify(&absent, &proof, &trust_base()).is_ok());
    }

    #[test]
    fn test_emptyblock_proof_verifies() {
        let b = certified_block(Vec::new());
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        assert!(verifier().verify(&tx(1, true, 0), &proof, &trust_base()).is_ok());
    }

    // ========== Test Group 2: Rejecting ==========

    #[test]
    fn test_empty_trust_base_is_input_error() {
        let b = certified_block(vec![tx(1, true, 0)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        assert_eq!(
            verifier().verify(&b.transactions[0], &proof, &TrustBase::new()),
            Err(ProofError::Input(InputError::MissingVerifiers))
        );
    }

    #[test]
    fn test_untrusted_certificate_rejected() {
        let b = certified_block(vec![tx(1, true, 0)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        let other = Ed25519KeyPair::from_seed([7u8; 32]);
        let base = TrustBase::new().with_verifier("root-1", Arc::new(Ed25519Verifier(other.public_key())));
        assert!(matches!(
            verifier().verify(&b.transactions[0], &proof, &base),
            Err(ProofError::InvalidCertificate(_))
        ));
    }

    #[test]
    fn test_wrong_transaction_rejected() {
        let b = certified_block(vec![tx(1, true, 0), tx(2, true, 1)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        let err = verifier()
            .verify(&b.transactions[1], &proof, &trust_base())
            .unwrap_err();
        assert!(err.is_verification_failure());
    }

    #[test]
    fn test_block_hash_mismatch_reports_hex() {
        let b = certified_block(vec![tx(1, true, 0)]);
        let mut proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        proof.block_header_hash[0] ^= 1;
        let err = verifier()
            .verify(&b.transactions[0], &proof, &trust_base())
            .unwrap_err();
        assert!(err.is_verification_failure());
        assert!(err
            .to_string()
            .contains(&hex::encode(b.unicity_certificate.committed_block_hash())));
    }

    #[test]
    fn test_notrans_rejected_for_present_unit() {
        let b = certified_block(vec![tx(10, true, 0), tx(20, true, 1)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(15)).unwrap();
        let err = verifier()
            .verify(&b.transactions[0], &proof, &trust_base())
            .unwrap_err();
        assert!(err.is_verification_failure());
    }

    #[test]
    fn test_relabelled_proof_type_rejected() {
        let b = certified_block(vec![tx(1, true, 0), tx(1, false, 1)]);
        let mut proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        proof.proof_type = ProofType::OnlySec;
        assert!(verifier()
            .verify(&b.transactions[0], &proof, &trust_base())
            .unwrap_err()
            .is_verification_failure());
    }

    #[test]
    fn test_verify_all_stops_at_first_failure() {
        let b = certified_block(vec![tx(1, true, 0), tx(2, true, 1)]);
        let proofs = builder().build_all(&b).unwrap();
        let good: Vec<(&TransactionOrder, &BlockProof)> = b
            .transactions
            .iter()
            .zip(proofs.iter().map(|(_, p)| p))
            .collect();
        assert!(verifier().verify_all(good, &trust_base()).is_ok());

        let swapped = vec![(&b.transactions[1], &proofs[0].1)];
        assert!(verifier()
            .verify_all(swapped, &trust_base())
            .unwrap_err()
            .is_verification_failure());
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let b = certified_block(vec![tx(1, true, 0)]);
        let proof = builder().build_primary_proof(&b, &UnitId::from(1)).unwrap();
        let blake = ProofVerifier::new(ProofConfig::with_algorithm(HashAlgorithm::Blake3));
        assert!(blake.verify(&b.transactions[0], &proof, &trust_base()).is_err());
    }
}
