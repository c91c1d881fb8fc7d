//! # Domain Module
//!
//! Pure hashing, tree, and proof types. No I/O.

pub mod errors;
pub mod header_hasher;
pub mod omt;
pub mod proof;
pub mod secondary_tree;
pub mod unit_extractor;
pub mod unit_hasher;
pub mod value_objects;

pub use errors::*;
pub use header_hasher::*;
pub use omt::*;
pub use proof::*;
pub use secondary_tree::*;
pub use unit_extractor::*;
pub use unit_hasher::*;
pub use value_objects::*;
