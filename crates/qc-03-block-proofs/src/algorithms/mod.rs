//! # Algorithms Module
//!
//! Proof construction and verification over the domain primitives.

pub mod proof_builder;
pub mod proof_verifier;

pub use proof_builder::ProofBuilder;
pub use proof_verifier::ProofVerifier;
