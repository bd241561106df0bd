//! The build → sign → submit pipeline for one transaction.
//!
//! A [`Tx`] is created per logical transaction and moves through [`TxState`] in one
//! direction. Each stage stores its failure in the `Tx` instead of returning it, and
//! every later stage is a no-op once an error is stored, so callers can chain all
//! three stages and inspect the outcome once at the end:
//!
//! ```ignore
//! let mut tx = Tx::new(provider, &config);
//! tx.build(&source, mutators).await.sign(&signers).submit().await;
//! tx.into_result()?;
//! ```
use super::resolve_signers;
use crate::{
    config::NetworkConfig,
    constants::{STELLAR_MAX_OPERATIONS, STELLAR_MAX_SIGNATURES},
    models::{
        BuildError, Memo, OperationSpec, Seed, SignError, SourceAccount,
        SubmitTransactionResponse, TxError,
    },
    services::{
        provider::{HorizonProviderTrait, ProviderError},
        signer::{network_id, LocalSigner},
    },
};
use log::{debug, info, warn};
use serde::Serialize;
use soroban_rs::xdr::{
    DecoratedSignature, Hash, Memo as XdrMemo, MuxedAccount, Operation, Preconditions,
    SequenceNumber, Transaction, TransactionEnvelope, TransactionExt, TransactionV1Envelope,
    Uint256,
};
use std::sync::Arc;
use stellar_strkey::ed25519::PublicKey;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum TxState {
    Fresh,
    Built,
    Signed,
    Submitted,
    Failed,
}

/// One change applied to the transaction at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxMutator {
    Memo(Memo),
    Operation(OperationSpec),
}

impl From<OperationSpec> for TxMutator {
    fn from(op: OperationSpec) -> Self {
        TxMutator::Operation(op)
    }
}

impl From<Memo> for TxMutator {
    fn from(memo: Memo) -> Self {
        TxMutator::Memo(memo)
    }
}

pub struct Tx<P> {
    provider: Arc<P>,
    network_id: Hash,
    base_fee: u32,
    simulated: bool,
    state: TxState,
    source: Option<SourceAccount>,
    transaction: Option<Transaction>,
    signatures: Vec<DecoratedSignature>,
    response: Option<SubmitTransactionResponse>,
    err: Option<TxError>,
}

impl<P> Tx<P>
where
    P: HorizonProviderTrait,
{
    pub fn new(provider: Arc<P>, config: &NetworkConfig) -> Self {
        Self {
            provider,
            network_id: network_id(config.passphrase()),
            base_fee: config.base_fee(),
            simulated: config.is_simulated(),
            state: TxState::Fresh,
            source: None,
            transaction: None,
            signatures: Vec::new(),
            response: None,
            err: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn err(&self) -> Option<&TxError> {
        self.err.as_ref()
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        &self.signatures
    }

    pub fn response(&self) -> Option<&SubmitTransactionResponse> {
        self.response.as_ref()
    }

    /// The v1 envelope with every signature attached so far.
    pub fn envelope(&self) -> Option<TransactionEnvelope> {
        let tx = self.transaction.clone()?;
        Some(TransactionEnvelope::Tx(TransactionV1Envelope {
            tx,
            signatures: self.signatures.clone().try_into().ok()?,
        }))
    }

    /// Final outcome of the pipeline.
    pub fn into_result(self) -> Result<SubmitTransactionResponse, TxError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        self.response.ok_or_else(|| {
            TxError::OutOfOrder(format!("transaction was not submitted (state {})", self.state))
        })
    }

    fn fail(&mut self, err: TxError) -> &mut Self {
        warn!("Transaction failed at {} stage: {}", err.stage(), err);
        self.err = Some(err);
        self.state = TxState::Failed;
        self
    }

    /// Assembles the transaction against the current state of `source`.
    ///
    /// Operations and memo are validated before the account is loaded, so malformed
    /// input never reaches the network. The sequence number is the loaded one plus
    /// one and the fee is the base fee times the operation count.
    pub async fn build(&mut self, source: &SourceAccount, mutators: Vec<TxMutator>) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if self.state != TxState::Fresh {
            return self.fail(TxError::OutOfOrder(format!(
                "build called on a transaction in state {}",
                self.state
            )));
        }

        let (address, memo, operations) = match assemble(source, &mutators) {
            Ok(parts) => parts,
            Err(err) => return self.fail(err.into()),
        };

        let account = match self.provider.load_account(&address).await {
            Ok(account) => account,
            Err(ProviderError::NotFound(address)) => {
                return self.fail(BuildError::SourceNotFound(address).into())
            }
            Err(err) => return self.fail(BuildError::SourceUnavailable(err).into()),
        };

        let transaction = match self.transaction_for(&address, account.sequence, memo, operations)
        {
            Ok(transaction) => transaction,
            Err(err) => return self.fail(err.into()),
        };

        debug!(
            "Built transaction for {} with {} operation(s), sequence {}",
            address,
            transaction.operations.len(),
            transaction.seq_num.0
        );
        self.source = Some(source.clone());
        self.transaction = Some(transaction);
        self.state = TxState::Built;
        self
    }

    fn transaction_for(
        &self,
        address: &str,
        sequence: i64,
        memo: XdrMemo,
        operations: Vec<Operation>,
    ) -> Result<Transaction, BuildError> {
        let public_key = PublicKey::from_string(address)
            .map_err(|e| BuildError::InvalidSource(e.to_string()))?;
        let seq_num = sequence.checked_add(1).ok_or_else(|| {
            BuildError::InvalidSource(format!("sequence number overflow for {address}"))
        })?;
        let fee = u32::try_from(operations.len())
            .ok()
            .and_then(|count| self.base_fee.checked_mul(count))
            .ok_or_else(|| BuildError::Encoding("transaction fee overflows u32".to_string()))?;

        Ok(Transaction {
            source_account: MuxedAccount::Ed25519(Uint256(public_key.0)),
            fee,
            seq_num: SequenceNumber(seq_num),
            cond: Preconditions::None,
            memo,
            operations: operations
                .try_into()
                .map_err(|e: soroban_rs::xdr::Error| BuildError::Encoding(e.to_string()))?,
            ext: TransactionExt::V0,
        })
    }

    /// Attaches one signature per resolved signer, in order.
    ///
    /// May be called more than once; signatures accumulate and a signature already on
    /// the envelope is not attached again. On a simulated network signers are skipped
    /// and the transaction is marked signed as is.
    pub fn sign(&mut self, signers: &[Seed]) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if !matches!(self.state, TxState::Built | TxState::Signed) {
            return self.fail(TxError::OutOfOrder(format!(
                "sign called on a transaction in state {}",
                self.state
            )));
        }
        if self.simulated {
            debug!("Simulated network, skipping {} signer(s)", signers.len());
            self.state = TxState::Signed;
            return self;
        }
        let (Some(source), Some(transaction)) = (self.source.as_ref(), self.transaction.as_ref())
        else {
            return self.fail(TxError::OutOfOrder("sign called before build".to_string()));
        };

        let signatures = match sign_with(source, signers, transaction, &self.network_id) {
            Ok(signatures) => signatures,
            Err(err) => return self.fail(err.into()),
        };

        let mut added = Vec::with_capacity(signatures.len());
        for signature in signatures {
            if self.signatures.contains(&signature) || added.contains(&signature) {
                debug!("Skipping duplicate signature {}", hex::encode(signature.hint.0));
                continue;
            }
            added.push(signature);
        }
        let total = self.signatures.len() + added.len();
        if total > STELLAR_MAX_SIGNATURES {
            return self.fail(SignError::TooManySignatures(total, STELLAR_MAX_SIGNATURES).into());
        }

        debug!("Attached {} signature(s)", added.len());
        self.signatures.extend(added);
        self.state = TxState::Signed;
        self
    }

    /// Sends the signed envelope to the network.
    pub async fn submit(&mut self) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        match self.state {
            TxState::Signed => {}
            TxState::Built => {
                return self.fail(TxError::OutOfOrder(
                    "submit called on an unsigned transaction".to_string(),
                ))
            }
            state => {
                return self.fail(TxError::OutOfOrder(format!(
                    "submit called on a transaction in state {state}"
                )))
            }
        }
        let Some(envelope) = self.envelope() else {
            return self.fail(
                SignError::Encoding("signatures do not fit the envelope".to_string()).into(),
            );
        };

        match self.provider.submit_transaction(&envelope).await {
            Ok(response) => {
                info!(
                    "Transaction {} accepted in ledger {}",
                    response.hash, response.ledger
                );
                self.response = Some(response);
                self.state = TxState::Submitted;
                self
            }
            Err(err) => self.fail(TxError::from_submit(err)),
        }
    }
}

/// Validates everything that needs no network: source address, memo and operations.
fn assemble(
    source: &SourceAccount,
    mutators: &[TxMutator],
) -> Result<(String, XdrMemo, Vec<Operation>), BuildError> {
    let address = source.resolve_address()?;

    let mut memo: Option<&Memo> = None;
    let mut operations = Vec::new();
    for mutator in mutators {
        match mutator {
            TxMutator::Memo(m) => {
                if memo.is_some() {
                    return Err(BuildError::InvalidMemo(
                        "a transaction carries at most one memo".to_string(),
                    ));
                }
                memo = Some(m);
            }
            TxMutator::Operation(spec) => operations.push(Operation::try_from(spec)?),
        }
    }

    if operations.is_empty() {
        return Err(BuildError::NoOperations);
    }
    if operations.len() > STELLAR_MAX_OPERATIONS {
        return Err(BuildError::TooManyOperations(
            operations.len(),
            STELLAR_MAX_OPERATIONS,
        ));
    }

    let memo = match memo {
        Some(memo) => XdrMemo::try_from(memo)?,
        None => XdrMemo::None,
    };
    Ok((address, memo, operations))
}

fn sign_with(
    source: &SourceAccount,
    signers: &[Seed],
    transaction: &Transaction,
    network_id: &Hash,
) -> Result<Vec<DecoratedSignature>, SignError> {
    resolve_signers(source, signers)?
        .into_iter()
        .map(|seed| LocalSigner::from_seed(seed)?.sign_transaction(transaction, network_id))
        .collect()
}
