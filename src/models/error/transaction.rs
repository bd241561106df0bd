use crate::{
    models::RejectionError,
    services::provider::ProviderError,
    utils::AmountError,
};
use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum TxStage {
    Build,
    Sign,
    Submit,
    Load,
    Pipeline,
}

/// Local failure while assembling the envelope.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum BuildError {
    #[error("Invalid source account: {0}")]
    InvalidSource(String),

    #[error("Source account not found: {0}")]
    SourceNotFound(String),

    #[error("Source account could not be loaded: {0}")]
    SourceUnavailable(ProviderError),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid memo: {0}")]
    InvalidMemo(String),

    #[error("Transaction has no operations")]
    NoOperations,

    #[error("Transaction has {0} operations, the maximum is {1}")]
    TooManyOperations(usize, usize),

    #[error("XDR encoding failed: {0}")]
    Encoding(String),
}

/// Failure while attaching signatures.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SignError {
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("No signing key available: source is an address and no signers were given")]
    NoSigners,

    #[error("Envelope would carry {0} signatures, the maximum is {1}")]
    TooManySignatures(usize, usize),

    #[error("Failed to encode signature payload: {0}")]
    Encoding(String),
}

/// The single terminal error of a transaction pipeline.
///
/// Every stage stores its failure here and later stages leave it untouched, so the
/// error a caller sees is always the first one that happened.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum TxError {
    #[error("Build failed: {0}")]
    Build(#[from] BuildError),

    #[error("Sign failed: {0}")]
    Sign(#[from] SignError),

    #[error("Submit failed: {0}")]
    Submit(ProviderError),

    #[error("Transaction rejected: {0}")]
    Rejection(RejectionError),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Account could not be loaded: {0}")]
    Load(ProviderError),

    #[error("Pipeline used out of order: {0}")]
    OutOfOrder(String),
}

impl TxError {
    pub fn stage(&self) -> TxStage {
        match self {
            TxError::Build(_) => TxStage::Build,
            TxError::Sign(_) => TxStage::Sign,
            TxError::Submit(_) | TxError::Rejection(_) => TxStage::Submit,
            TxError::NotFound(_) | TxError::Load(_) => TxStage::Load,
            TxError::OutOfOrder(_) => TxStage::Pipeline,
        }
    }

    /// Unwraps the network-side rejection payload, if the ledger rejected the envelope.
    pub fn rejection(&self) -> Option<&RejectionError> {
        match self {
            TxError::Rejection(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Determines if resubmitting a freshly built transaction may succeed.
    ///
    /// Transport hiccups are transient; malformed input, bad keys and ledger
    /// rejections are not.
    pub fn is_transient(&self) -> bool {
        match self {
            TxError::Submit(err) | TxError::Load(err) => err.is_transient(),
            TxError::Build(BuildError::SourceUnavailable(err)) => err.is_transient(),
            _ => false,
        }
    }

    /// Maps a provider failure from an account read.
    pub fn from_load(error: ProviderError) -> Self {
        match error {
            ProviderError::NotFound(address) => TxError::NotFound(address),
            other => TxError::Load(other),
        }
    }

    /// Maps a provider failure from an envelope submission.
    pub fn from_submit(error: ProviderError) -> Self {
        match error {
            ProviderError::Rejected(rejection) => TxError::Rejection(rejection),
            other => TxError::Submit(other),
        }
    }
}

/// Renders an error the way Horizon reports it: result codes when the ledger rejected
/// the transaction, the plain error message otherwise.
pub fn error_string(error: &TxError) -> String {
    match error.rejection() {
        Some(rejection) => rejection.result_code_summary(),
        None => error.to_string(),
    }
}
