//! Horizon REST provider.
//!
//! Loads accounts from `GET /accounts/{id}` and submits envelopes to
//! `POST /transactions`. Horizon answers failures with a problem document; a
//! rejected transaction carries `extras.result_codes`, which is kept intact as a
//! [`RejectionError`] so callers can inspect it.

use super::{HorizonProviderTrait, ProviderError};
use crate::models::{
    Account, HorizonAccountResponse, HorizonProblem, RejectionError, SubmitTransactionResponse,
};
use crate::utils::{join_url, normalize_url_for_log};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode, Url};
use soroban_rs::xdr::{Limits, TransactionEnvelope, WriteXdr};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HorizonProvider {
    base_url: String,
    client: Client,
}

impl HorizonProvider {
    /// Create a new HorizonProvider instance
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Horizon server (e.g., "https://horizon-testnet.stellar.org")
    /// * `timeout_seconds` - Overall timeout applied to every request
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ProviderError> {
        Url::parse(base_url).map_err(|e| {
            ProviderError::NetworkConfiguration(format!("Invalid Horizon URL '{base_url}': {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                ProviderError::NetworkConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Maps a non-success Horizon response to a provider error.
    ///
    /// Problem documents with a 4xx status on submission are ledger rejections;
    /// anything else is a transport-level failure.
    async fn error_from_response(response: Response, submitting: bool) -> ProviderError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        match status {
            StatusCode::TOO_MANY_REQUESTS => return ProviderError::RateLimited,
            StatusCode::BAD_GATEWAY => return ProviderError::BadGateway,
            StatusCode::GATEWAY_TIMEOUT => return ProviderError::Timeout,
            _ => {}
        }

        if submitting && status.is_client_error() {
            if let Ok(problem) = serde_json::from_str::<HorizonProblem>(&body) {
                return ProviderError::Rejected(RejectionError::from(problem));
            }
        }

        ProviderError::RequestError {
            error: format!("Horizon API returned error {status}: {body}"),
            status_code: status.as_u16(),
        }
    }
}

#[async_trait]
impl HorizonProviderTrait for HorizonProvider {
    async fn load_account(&self, address: &str) -> Result<Account, ProviderError> {
        let url = join_url(&self.base_url, &format!("accounts/{address}"));
        debug!("Loading account from Horizon: {}", normalize_url_for_log(&url));

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(address.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::error_from_response(response, false).await);
        }

        let account: HorizonAccountResponse = response.json().await.map_err(|e| {
            ProviderError::Other(format!("Failed to deserialize account response: {e}"))
        })?;

        Account::try_from(account).map_err(ProviderError::Other)
    }

    async fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SubmitTransactionResponse, ProviderError> {
        let xdr = envelope.to_xdr_base64(Limits::none()).map_err(|e| {
            ProviderError::Other(format!("Failed to encode transaction envelope: {e}"))
        })?;
        let url = join_url(&self.base_url, "transactions");
        debug!("Submitting transaction to Horizon: {}", normalize_url_for_log(&url));

        let response = self
            .client
            .post(&url)
            .form(&[("tx", xdr.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::error_from_response(response, true).await;
            warn!("Horizon did not accept transaction: {}", err);
            return Err(err);
        }

        response.json().await.map_err(|e| {
            ProviderError::Other(format!("Failed to deserialize submit response: {e}"))
        })
    }
}
