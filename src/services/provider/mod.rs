//! Network transport to a Stellar ledger.
//!
//! [`HorizonProviderTrait`] is the seam between the transaction pipeline and the
//! network. [`HorizonProvider`] talks to a live Horizon server, [`SimulatedProvider`]
//! answers locally without any I/O, and [`NetworkProvider`] picks one of them from
//! the configured [`NetworkConfig`].

use crate::config::NetworkConfig;
use crate::models::{Account, RejectionError, SubmitTransactionResponse};
use async_trait::async_trait;
use serde::Serialize;
use soroban_rs::xdr::TransactionEnvelope;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

mod horizon;
pub use horizon::*;

mod simulated;
pub use simulated::*;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ProviderError {
    #[error("Account not found: {0}")]
    NotFound(String),
    #[error("Transaction rejected: {0}")]
    Rejected(RejectionError),
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),
    #[error("Request timeout")]
    Timeout,
    #[error("Rate limited (HTTP 429)")]
    RateLimited,
    #[error("Bad gateway (HTTP 502)")]
    BadGateway,
    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Other provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Determines if this error is transient (can retry) or permanent (should fail).
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Timeout
            | ProviderError::RateLimited
            | ProviderError::BadGateway
            | ProviderError::TransportError(_) => true,
            ProviderError::RequestError { status_code, .. } => *status_code >= 500,
            ProviderError::NotFound(_)
            | ProviderError::Rejected(_)
            | ProviderError::NetworkConfiguration(_)
            | ProviderError::Other(_) => false,
        }
    }
}

/// Categorizes a reqwest error into an appropriate `ProviderError` variant.
///
/// - Timeout errors become `ProviderError::Timeout`
/// - HTTP 429 responses become `ProviderError::RateLimited`
/// - HTTP 502 responses become `ProviderError::BadGateway`
/// - Connection failures become `ProviderError::TransportError`
/// - All other errors become `ProviderError::Other` with the error message
fn categorize_reqwest_error(err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        return ProviderError::Timeout;
    }

    if let Some(status) = err.status() {
        return match status.as_u16() {
            429 => ProviderError::RateLimited,
            502 => ProviderError::BadGateway,
            code => ProviderError::RequestError {
                error: err.to_string(),
                status_code: code,
            },
        };
    }

    if err.is_connect() || err.is_request() {
        return ProviderError::TransportError(err.to_string());
    }

    ProviderError::Other(err.to_string())
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        categorize_reqwest_error(&err)
    }
}

/// Read and submit access to a Stellar ledger.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait HorizonProviderTrait: Send + Sync {
    /// Loads the current state of `address`. Fails with `ProviderError::NotFound`
    /// when the ledger has no such account.
    async fn load_account(&self, address: &str) -> Result<Account, ProviderError>;

    /// Submits a signed envelope. A ledger rejection comes back as
    /// `ProviderError::Rejected` carrying Horizon's result codes.
    async fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SubmitTransactionResponse, ProviderError>;
}

/// Provider selected from a [`NetworkConfig`].
#[derive(Debug, Clone)]
pub enum NetworkProvider {
    Horizon(HorizonProvider),
    Simulated(SimulatedProvider),
}

impl NetworkProvider {
    pub fn from_config(config: &NetworkConfig) -> Result<Self, ProviderError> {
        match config {
            NetworkConfig::Live(live) => Ok(NetworkProvider::Horizon(HorizonProvider::new(
                &live.horizon_url,
                live.timeout_seconds,
            )?)),
            NetworkConfig::Simulated => Ok(NetworkProvider::Simulated(SimulatedProvider::new())),
        }
    }
}

#[async_trait]
impl HorizonProviderTrait for NetworkProvider {
    async fn load_account(&self, address: &str) -> Result<Account, ProviderError> {
        match self {
            NetworkProvider::Horizon(provider) => provider.load_account(address).await,
            NetworkProvider::Simulated(provider) => provider.load_account(address).await,
        }
    }

    async fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SubmitTransactionResponse, ProviderError> {
        match self {
            NetworkProvider::Horizon(provider) => provider.submit_transaction(envelope).await,
            NetworkProvider::Simulated(provider) => provider.submit_transaction(envelope).await,
        }
    }
}
