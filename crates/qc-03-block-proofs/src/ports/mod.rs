//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`BlockProofApi`], consumed by adapters
//! - **Driven Ports (Outbound)**: signature verification, provided by
//!   `shared_types::SignatureVerifier` through the trust base

pub mod inbound;

pub use inbound::*;
