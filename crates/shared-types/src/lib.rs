//! # Shared Types Crate
//!
//! Ledger entities the block proof engine consumes but never produces or
//! mutates.
//!
//! ## Design Principles
//!
//! - **Canonical keys**: a unit is addressed by a 256-bit id whose only key
//!   form is the fixed 32-byte big-endian array ([`UnitId`]).
//! - **Immutable transactions**: hashes are recomputed on demand, nothing is
//!   memoized on the transaction object.
//! - **Opaque certificates**: [`UnicityCertificate`] is validated against a
//!   [`TrustBase`] and otherwise passed through untouched.

pub mod certificate;
pub mod entities;
pub mod errors;

pub use certificate::*;
pub use entities::*;
pub use errors::*;
