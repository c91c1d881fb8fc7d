//! # Application Module
//!
//! Application services exposing the domain through the inbound port.

pub mod service;

pub use service::BlockProofService;
