//! # MicroStellar
//!
//! A small client for the Stellar network: create key pairs, load accounts, and
//! build, sign and submit transactions through [`domain::MicroStellar`].
//!
//! ```no_run
//! use microstellar::{config::NetworkConfig, domain::MicroStellar, models::SourceAccount};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MicroStellar::new(NetworkConfig::testnet())?;
//! let payer = client.create_keypair();
//! let payee = client.create_keypair();
//! client
//!     .pay_native(&SourceAccount::Seed(payer.seed), &payee.address, "10", &[])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
