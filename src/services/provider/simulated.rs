//! Provider that never leaves the process.
//!
//! Every account exists with a zero-valued snapshot and every envelope is accepted.
//! Used for `NetworkConfig::Simulated`, so callers can drive the whole pipeline
//! deterministically.

use super::{HorizonProviderTrait, ProviderError};
use crate::config::NetworkConfig;
use crate::models::{Account, SubmitTransactionResponse};
use crate::services::signer::{network_id, transaction_hash};
use async_trait::async_trait;
use log::debug;
use soroban_rs::xdr::{Hash, Limits, TransactionEnvelope, WriteXdr};

#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    network_id: Hash,
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self {
            network_id: network_id(NetworkConfig::Simulated.passphrase()),
        }
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HorizonProviderTrait for SimulatedProvider {
    async fn load_account(&self, address: &str) -> Result<Account, ProviderError> {
        debug!("Simulated load of account {}", address);
        Ok(Account::empty(address))
    }

    async fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SubmitTransactionResponse, ProviderError> {
        let TransactionEnvelope::Tx(v1) = envelope else {
            return Err(ProviderError::Other(
                "Simulated network only accepts v1 envelopes".to_string(),
            ));
        };
        let hash = transaction_hash(&v1.tx, &self.network_id)
            .map_err(|e| ProviderError::Other(format!("Failed to hash transaction: {e}")))?;
        let envelope_xdr = envelope
            .to_xdr_base64(Limits::none())
            .map_err(|e| ProviderError::Other(format!("Failed to encode envelope: {e}")))?;

        debug!("Simulated acceptance of transaction {}", hex::encode(hash));
        Ok(SubmitTransactionResponse {
            hash: hex::encode(hash),
            ledger: 0,
            envelope_xdr: Some(envelope_xdr),
            result_xdr: None,
        })
    }
}
