//! # Services Module
//!
//! Network providers for Horizon and the simulated ledger, and the local
//! transaction signer.

pub mod provider;
pub use provider::*;

pub mod signer;
pub use signer::*;
