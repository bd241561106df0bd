//! Horizon REST payloads.
//!
//! Only the fields the client reads are modelled; everything else in the responses is
//! ignored by serde.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `GET /accounts/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HorizonAccountResponse {
    pub account_id: String,
    /// Horizon renders the 64-bit sequence as a string.
    pub sequence: String,
    #[serde(default)]
    pub balances: Vec<HorizonBalance>,
    #[serde(default)]
    pub signers: Vec<HorizonSigner>,
    #[serde(default)]
    pub thresholds: HorizonThresholds,
    #[serde(default)]
    pub flags: HorizonFlags,
    #[serde(default)]
    pub home_domain: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HorizonBalance {
    pub balance: String,
    #[serde(default)]
    pub limit: Option<String>,
    pub asset_type: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_issuer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HorizonSigner {
    pub key: String,
    pub weight: u32,
    #[serde(rename = "type")]
    pub signer_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HorizonThresholds {
    pub low_threshold: u8,
    pub med_threshold: u8,
    pub high_threshold: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HorizonFlags {
    #[serde(default)]
    pub auth_required: bool,
    #[serde(default)]
    pub auth_revocable: bool,
    #[serde(default)]
    pub auth_immutable: bool,
    #[serde(default)]
    pub auth_clawback_enabled: bool,
}

/// `POST /transactions` success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    pub hash: String,
    #[serde(default)]
    pub ledger: u32,
    #[serde(default)]
    pub envelope_xdr: Option<String>,
    #[serde(default)]
    pub result_xdr: Option<String>,
}

/// Horizon problem document (RFC 7807) returned on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct HorizonProblem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub extras: Option<HorizonProblemExtras>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HorizonProblemExtras {
    #[serde(default)]
    pub result_codes: Option<ResultCodes>,
    #[serde(default)]
    pub result_xdr: Option<String>,
}

/// Transaction and per-operation result codes, e.g. `tx_failed` / `[op_underfunded]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCodes {
    #[serde(default)]
    pub transaction: String,
    #[serde(default)]
    pub operations: Vec<String>,
}

/// The ledger's structured reason for rejecting an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionError {
    pub status: u16,
    pub title: String,
    pub detail: String,
    pub result_codes: Option<ResultCodes>,
    pub result_xdr: Option<String>,
}

impl RejectionError {
    /// `"tx_failed: [op_underfunded, op_success]"`, or the title when Horizon sent no codes.
    pub fn result_code_summary(&self) -> String {
        match &self.result_codes {
            Some(codes) if codes.operations.is_empty() => codes.transaction.clone(),
            Some(codes) => format!(
                "{}: [{}]",
                codes.transaction,
                codes.operations.join(", ")
            ),
            None => self.title.clone(),
        }
    }
}

impl From<HorizonProblem> for RejectionError {
    fn from(problem: HorizonProblem) -> Self {
        let (result_codes, result_xdr) = match problem.extras {
            Some(extras) => (extras.result_codes, extras.result_xdr),
            None => (None, None),
        };
        Self {
            status: problem.status,
            title: problem.title,
            detail: problem.detail,
            result_codes,
            result_xdr,
        }
    }
}

impl fmt::Display for RejectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (HTTP {})", self.result_code_summary(), self.status)
    }
}
