//! # Domain Module
//!
//! Core client logic:
//!
//! * The build, sign and submit pipeline for a single transaction
//! * Signer resolution for seed and address sources
//! * The [`MicroStellar`] facade exposing one call per ledger capability

mod client;
pub use client::*;

pub mod transaction;
pub use transaction::*;
