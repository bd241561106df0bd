//! Network selection.
//!
//! A client either talks to a Horizon server ([`NetworkConfig::Live`]) or runs
//! entirely in-process ([`NetworkConfig::Simulated`]). Names accepted when parsing:
//!
//! | Name                 | Network            |
//! |----------------------|--------------------|
//! | `public`, `mainnet`  | public network     |
//! | `test`, `testnet`    | SDF test network   |
//! | `fake`, `simulated`  | no network I/O     |
//! | `custom`             | `HORIZON_URL` and `STELLAR_NETWORK_PASSPHRASE` required |
use super::ConfigError;
use crate::constants::{
    DEFAULT_HORIZON_TIMEOUT_SECONDS, STELLAR_DEFAULT_TRANSACTION_FEE,
    STELLAR_HORIZON_MAINNET_URL, STELLAR_HORIZON_TESTNET_URL, STELLAR_PUBLIC_PASSPHRASE,
    STELLAR_TESTNET_PASSPHRASE,
};
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveNetwork {
    pub horizon_url: String,
    pub passphrase: String,
    pub timeout_seconds: u64,
    /// Fee per operation, in stroops.
    pub base_fee: u32,
}

impl LiveNetwork {
    pub fn public() -> Self {
        Self {
            horizon_url: STELLAR_HORIZON_MAINNET_URL.to_string(),
            passphrase: STELLAR_PUBLIC_PASSPHRASE.to_string(),
            timeout_seconds: DEFAULT_HORIZON_TIMEOUT_SECONDS,
            base_fee: STELLAR_DEFAULT_TRANSACTION_FEE,
        }
    }

    pub fn testnet() -> Self {
        Self {
            horizon_url: STELLAR_HORIZON_TESTNET_URL.to_string(),
            passphrase: STELLAR_TESTNET_PASSPHRASE.to_string(),
            timeout_seconds: DEFAULT_HORIZON_TIMEOUT_SECONDS,
            base_fee: STELLAR_DEFAULT_TRANSACTION_FEE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkConfig {
    Live(LiveNetwork),
    Simulated,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

impl NetworkConfig {
    pub fn public() -> Self {
        NetworkConfig::Live(LiveNetwork::public())
    }

    pub fn testnet() -> Self {
        NetworkConfig::Live(LiveNetwork::testnet())
    }

    /// Passphrase the envelope is signed against. Simulated envelopes use the
    /// test network's, so they stay valid if replayed there.
    pub fn passphrase(&self) -> &str {
        match self {
            NetworkConfig::Live(live) => &live.passphrase,
            NetworkConfig::Simulated => STELLAR_TESTNET_PASSPHRASE,
        }
    }

    pub fn base_fee(&self) -> u32 {
        match self {
            NetworkConfig::Live(live) => live.base_fee,
            NetworkConfig::Simulated => STELLAR_DEFAULT_TRANSACTION_FEE,
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, NetworkConfig::Simulated)
    }

    /// Reads the configuration from process environment variables.
    ///
    /// `STELLAR_NETWORK` defaults to `test`. `HORIZON_URL`,
    /// `STELLAR_NETWORK_PASSPHRASE`, `HORIZON_TIMEOUT_SECONDS` and
    /// `STELLAR_BASE_FEE` override the defaults of the selected live network.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = var("STELLAR_NETWORK").unwrap_or_else(|| "test".to_string());
        let mut live = match name.trim().to_lowercase().as_str() {
            "custom" => LiveNetwork {
                horizon_url: var("HORIZON_URL")
                    .ok_or_else(|| ConfigError::MissingField("HORIZON_URL".into()))?,
                passphrase: var("STELLAR_NETWORK_PASSPHRASE").ok_or_else(|| {
                    ConfigError::MissingField("STELLAR_NETWORK_PASSPHRASE".into())
                })?,
                ..LiveNetwork::testnet()
            },
            other => match other.parse::<NetworkConfig>()? {
                NetworkConfig::Live(live) => live,
                NetworkConfig::Simulated => return Ok(NetworkConfig::Simulated),
            },
        };

        if let Some(url) = var("HORIZON_URL") {
            live.horizon_url = url;
        }
        if let Some(passphrase) = var("STELLAR_NETWORK_PASSPHRASE") {
            live.passphrase = passphrase;
        }
        if let Some(timeout) = var("HORIZON_TIMEOUT_SECONDS") {
            live.timeout_seconds = parse_field("HORIZON_TIMEOUT_SECONDS", &timeout)?;
        }
        if let Some(fee) = var("STELLAR_BASE_FEE") {
            live.base_fee = parse_field("STELLAR_BASE_FEE", &fee)?;
        }
        if live.base_fee == 0 {
            return Err(ConfigError::InvalidValue {
                field: "STELLAR_BASE_FEE".into(),
                value: "0".into(),
            });
        }

        Ok(NetworkConfig::Live(live))
    }
}

fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl FromStr for NetworkConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" | "mainnet" => Ok(NetworkConfig::public()),
            "test" | "testnet" => Ok(NetworkConfig::testnet()),
            "fake" | "simulated" => Ok(NetworkConfig::Simulated),
            _ => Err(ConfigError::InvalidNetwork(s.to_string())),
        }
    }
}
