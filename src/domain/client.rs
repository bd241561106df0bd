//! # MicroStellar client
//!
//! One call per ledger capability. Every mutating call builds its operations, runs a
//! fresh [`Tx`] end to end and returns the pipeline's error unchanged.
//!
//! Each call takes a [`SourceAccount`] and an ordered list of extra signer seeds.
//! When the list is empty the source must be a seed and signs for itself; otherwise
//! only the listed seeds sign, and the source may be a bare address.
use crate::{
    config::NetworkConfig,
    domain::{Tx, TxMutator},
    models::{
        Account, AccountFlag, Asset, BuildError, KeyPair, Memo, OperationSpec, Payment, Seed,
        SourceAccount, SubmitTransactionResponse, TrustLimit, TxError,
    },
    services::provider::{HorizonProviderTrait, NetworkProvider, ProviderError},
};
use log::{debug, info};
use std::sync::Arc;

pub struct MicroStellar<P = NetworkProvider> {
    config: NetworkConfig,
    provider: Arc<P>,
}

impl MicroStellar<NetworkProvider> {
    /// Creates a client for `config`, talking to Horizon for live networks.
    pub fn new(config: NetworkConfig) -> Result<Self, ProviderError> {
        let provider = NetworkProvider::from_config(&config)?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }
}

impl<P> MicroStellar<P>
where
    P: HorizonProviderTrait,
{
    pub fn with_provider(config: NetworkConfig, provider: Arc<P>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Read access to the network for out-of-band queries.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn create_keypair(&self) -> KeyPair {
        KeyPair::random()
    }

    pub async fn load_account(&self, address: &str) -> Result<Account, TxError> {
        let address = SourceAccount::address(address).resolve_address()?;
        debug!("Loading account {}", address);
        self.provider
            .load_account(&address)
            .await
            .map_err(TxError::from_load)
    }

    /// Runs one transaction carrying `mutators` and returns the network's acceptance.
    pub async fn submit(
        &self,
        source: &SourceAccount,
        mutators: Vec<TxMutator>,
        signers: &[Seed],
    ) -> Result<SubmitTransactionResponse, TxError> {
        let mut tx = Tx::new(self.provider.clone(), &self.config);
        tx.build(source, mutators).await.sign(signers).submit().await;
        tx.into_result()
    }

    async fn run(
        &self,
        source: &SourceAccount,
        operation: OperationSpec,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        let response = self
            .submit(source, vec![TxMutator::Operation(operation)], signers)
            .await?;
        info!("Transaction {} submitted", response.hash);
        Ok(())
    }

    /// Creates `address` on the ledger, funded with `amount` lumens from `source`.
    pub async fn fund_account(
        &self,
        source: &SourceAccount,
        address: &str,
        amount: &str,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::CreateAccount {
                destination: address.to_string(),
                starting_balance: amount.to_string(),
            },
            signers,
        )
        .await
    }

    pub async fn pay_native(
        &self,
        source: &SourceAccount,
        target_address: &str,
        amount: &str,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::Payment {
                destination: target_address.to_string(),
                asset: Asset::native(),
                amount: amount.to_string(),
            },
            signers,
        )
        .await
    }

    /// Sends `payment`. A memo, when present, precedes the payment operation.
    pub async fn pay(&self, payment: Payment) -> Result<(), TxError> {
        let mut mutators = Vec::with_capacity(2);
        if payment.memo != Memo::None {
            mutators.push(TxMutator::Memo(payment.memo));
        }
        mutators.push(TxMutator::Operation(OperationSpec::Payment {
            destination: payment.target_address,
            asset: payment.asset,
            amount: payment.amount,
        }));

        let response = self
            .submit(&payment.source, mutators, &payment.signer_seeds)
            .await?;
        info!("Payment {} submitted", response.hash);
        Ok(())
    }

    /// Trusts `asset` up to `limit`; an empty limit trusts without a cap.
    pub async fn create_trust_line(
        &self,
        source: &SourceAccount,
        asset: &Asset,
        limit: &str,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        if asset.is_native() {
            return Err(BuildError::InvalidOperation(
                "cannot create a trust line for the native asset".to_string(),
            )
            .into());
        }
        self.run(
            source,
            OperationSpec::ChangeTrust {
                asset: asset.clone(),
                limit: TrustLimit::from_limit_str(limit),
            },
            signers,
        )
        .await
    }

    pub async fn remove_trust_line(
        &self,
        source: &SourceAccount,
        asset: &Asset,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::ChangeTrust {
                asset: asset.clone(),
                limit: TrustLimit::Remove,
            },
            signers,
        )
        .await
    }

    pub async fn set_master_weight(
        &self,
        source: &SourceAccount,
        weight: u32,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(source, OperationSpec::SetMasterWeight { weight }, signers)
            .await
    }

    pub async fn add_signer(
        &self,
        source: &SourceAccount,
        signer_address: &str,
        weight: u32,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::AddSigner {
                address: signer_address.to_string(),
                weight,
            },
            signers,
        )
        .await
    }

    pub async fn remove_signer(
        &self,
        source: &SourceAccount,
        signer_address: &str,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::RemoveSigner {
                address: signer_address.to_string(),
            },
            signers,
        )
        .await
    }

    pub async fn set_thresholds(
        &self,
        source: &SourceAccount,
        low: u32,
        medium: u32,
        high: u32,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::SetThresholds { low, medium, high },
            signers,
        )
        .await
    }

    pub async fn set_home_domain(
        &self,
        source: &SourceAccount,
        domain: &str,
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::SetHomeDomain {
                domain: domain.to_string(),
            },
            signers,
        )
        .await
    }

    pub async fn set_flags(
        &self,
        source: &SourceAccount,
        flags: &[AccountFlag],
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::SetFlags {
                flags: flags.to_vec(),
            },
            signers,
        )
        .await
    }

    pub async fn clear_flags(
        &self,
        source: &SourceAccount,
        flags: &[AccountFlag],
        signers: &[Seed],
    ) -> Result<(), TxError> {
        self.run(
            source,
            OperationSpec::ClearFlags {
                flags: flags.to_vec(),
            },
            signers,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::provider::MockHorizonProviderTrait;
    use crate::services::signer::LocalSigner;
    use soroban_rs::xdr::{
        Asset as XdrAsset, Memo as XdrMemo, OperationBody, SignerKey, TransactionEnvelope,
        TransactionV1Envelope,
    };
    use std::sync::Mutex;

    const ISSUER: &str = "GBBD47IF6LWK7P7MDEVSCWR7DPUWV3NY3DTQEVFL4NAT4AQH3ZLLFLA5";

    /// Provider that accepts everything and records each submitted envelope.
    fn recording_provider() -> (MockHorizonProviderTrait, Arc<Mutex<Vec<TransactionV1Envelope>>>) {
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let sink = submitted.clone();
        let mut provider = MockHorizonProviderTrait::new();
        provider.expect_load_account().returning(|address| {
            let mut account = Account::empty(address);
            account.sequence = 100;
            Box::pin(async move { Ok(account) })
        });
        provider
            .expect_submit_transaction()
            .returning(move |envelope| {
                if let TransactionEnvelope::Tx(v1) = envelope {
                    sink.lock().unwrap().push(v1.clone());
                }
                Box::pin(async {
                    Ok(SubmitTransactionResponse {
                        hash: "feed".to_string(),
                        ledger: 1,
                        envelope_xdr: None,
                        result_xdr: None,
                    })
                })
            });
        (provider, submitted)
    }

    fn client(provider: MockHorizonProviderTrait) -> MicroStellar<MockHorizonProviderTrait> {
        MicroStellar::with_provider(NetworkConfig::testnet(), Arc::new(provider))
    }

    fn only_envelope(submitted: &Mutex<Vec<TransactionV1Envelope>>) -> TransactionV1Envelope {
        let submitted = submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        submitted[0].clone()
    }

    fn hint(seed: &Seed) -> [u8; 4] {
        LocalSigner::from_seed(seed).unwrap().signature_hint().0
    }

    #[tokio::test]
    async fn test_pay_native_in_simulated_mode() {
        let client = MicroStellar::new(NetworkConfig::Simulated).unwrap();
        let a = client.create_keypair();
        let b = client.create_keypair();
        let result = client
            .pay_native(&SourceAccount::Seed(a.seed), &b.address, "10", &[])
            .await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_native_payment_operation() {
        let (provider, submitted) = recording_provider();
        let client = client(provider);
        let a = KeyPair::random();
        let b = KeyPair::random();

        client
            .pay(Payment::new(SourceAccount::Seed(a.seed), &b.address, "2.5"))
            .await
            .unwrap();

        let envelope = only_envelope(&submitted);
        assert_eq!(envelope.tx.memo, XdrMemo::None);
        match &envelope.tx.operations[0].body {
            OperationBody::Payment(op) => {
                assert_eq!(op.asset, XdrAsset::Native);
                assert_eq!(op.amount, 25_000_000);
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_credit_payment_keeps_code_and_issuer_with_memo_first() {
        let (provider, submitted) = recording_provider();
        let client = client(provider);
        let a = KeyPair::random();
        let b = KeyPair::random();
        let usd = Asset::credit("USD", ISSUER);

        client
            .pay(
                Payment::new(SourceAccount::Seed(a.seed), &b.address, "1")
                    .with_asset(usd.clone())
                    .with_memo_id(9),
            )
            .await
            .unwrap();

        let envelope = only_envelope(&submitted);
        assert_eq!(envelope.tx.memo, XdrMemo::Id(9));
        assert_eq!(envelope.tx.operations.len(), 1);
        match &envelope.tx.operations[0].body {
            OperationBody::Payment(op) => {
                assert_eq!(op.asset, XdrAsset::try_from(&usd).unwrap());
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pay_zero_is_build_error_without_network() {
        let mut provider = MockHorizonProviderTrait::new();
        provider.expect_load_account().never();
        provider.expect_submit_transaction().never();
        let client = client(provider);
        let a = KeyPair::random();
        let b = KeyPair::random();

        let err = client
            .pay_native(&SourceAccount::Seed(a.seed), &b.address, "0", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, TxError::Build(BuildError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_trust_line_limits() {
        let (provider, submitted) = recording_provider();
        let client = client(provider);
        let a = SourceAccount::Seed(KeyPair::random().seed);
        let usd = Asset::credit("USD", ISSUER);

        client.create_trust_line(&a, &usd, "", &[]).await.unwrap();
        client.create_trust_line(&a, &usd, "1000", &[]).await.unwrap();
        client.remove_trust_line(&a, &usd, &[]).await.unwrap();

        let limits: Vec<i64> = submitted
            .lock()
            .unwrap()
            .iter()
            .map(|env| match &env.tx.operations[0].body {
                OperationBody::ChangeTrust(op) => op.limit,
                other => panic!("unexpected operation {other:?}"),
            })
            .collect();
        assert_eq!(limits, vec![i64::MAX, 10_000_000_000, 0]);
    }

    #[tokio::test]
    async fn test_native_trust_line_is_rejected() {
        let mut provider = MockHorizonProviderTrait::new();
        provider.expect_load_account().never();
        let client = client(provider);
        let a = SourceAccount::Seed(KeyPair::random().seed);
        assert!(matches!(
            client.create_trust_line(&a, &Asset::native(), "", &[]).await,
            Err(TxError::Build(BuildError::InvalidOperation(_)))
        ));
    }

    #[tokio::test]
    async fn test_add_signer_signs_only_with_explicit_signer() {
        let (provider, submitted) = recording_provider();
        let client = client(provider);
        let a = KeyPair::random();
        let b = KeyPair::random();
        let c = KeyPair::random();

        client
            .add_signer(
                &SourceAccount::Address(a.address.clone()),
                &c.address,
                1,
                &[b.seed.clone()],
            )
            .await
            .unwrap();

        let envelope = only_envelope(&submitted);
        assert_eq!(envelope.signatures.len(), 1);
        assert_eq!(envelope.signatures[0].hint.0, hint(&b.seed));
        assert_ne!(envelope.signatures[0].hint.0, hint(&a.seed));
        match &envelope.tx.operations[0].body {
            OperationBody::SetOptions(op) => {
                let signer = op.signer.as_ref().unwrap();
                assert_eq!(signer.weight, 1);
                assert!(matches!(signer.key, SignerKey::Ed25519(_)));
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_address_source_without_signers_fails_to_sign() {
        let mut provider = MockHorizonProviderTrait::new();
        provider.expect_load_account().returning(|address| {
            let account = Account::empty(address);
            Box::pin(async move { Ok(account) })
        });
        provider.expect_submit_transaction().never();
        let client = client(provider);
        let a = KeyPair::random();

        let err = client
            .set_master_weight(&SourceAccount::Address(a.address), 0, &[])
            .await
            .unwrap_err();
        assert_eq!(err, TxError::Sign(crate::models::SignError::NoSigners));
    }

    #[tokio::test]
    async fn test_account_options_operations() {
        let (provider, submitted) = recording_provider();
        let client = client(provider);
        let a = SourceAccount::Seed(KeyPair::random().seed);
        let c = KeyPair::random();

        client.set_thresholds(&a, 1, 2, 3, &[]).await.unwrap();
        client.set_home_domain(&a, "example.com", &[]).await.unwrap();
        client
            .set_flags(&a, &[AccountFlag::AuthRequired, AccountFlag::AuthRevocable], &[])
            .await
            .unwrap();
        client
            .clear_flags(&a, &[AccountFlag::AuthRevocable], &[])
            .await
            .unwrap();
        client.remove_signer(&a, &c.address, &[]).await.unwrap();

        let submitted = submitted.lock().unwrap();
        let ops: Vec<_> = submitted
            .iter()
            .map(|env| match &env.tx.operations[0].body {
                OperationBody::SetOptions(op) => op.clone(),
                other => panic!("unexpected operation {other:?}"),
            })
            .collect();
        assert_eq!(
            (ops[0].low_threshold, ops[0].med_threshold, ops[0].high_threshold),
            (Some(1), Some(2), Some(3))
        );
        assert_eq!(
            ops[1].home_domain.as_ref().map(|d| d.0.to_utf8_string_lossy()),
            Some("example.com".to_string())
        );
        assert_eq!(ops[2].set_flags, Some(3));
        assert_eq!(ops[3].clear_flags, Some(2));
        assert_eq!(ops[4].signer.as_ref().map(|s| s.weight), Some(0));
    }

    #[tokio::test]
    async fn test_load_account_errors() {
        let mut provider = MockHorizonProviderTrait::new();
        provider.expect_load_account().returning(|address| {
            let address = address.to_string();
            Box::pin(async move { Err(ProviderError::NotFound(address)) })
        });
        let client = client(provider);
        let a = KeyPair::random();

        assert_eq!(
            client.load_account(&a.address).await,
            Err(TxError::NotFound(a.address.clone()))
        );
        assert!(matches!(
            client.load_account("not-an-address").await,
            Err(TxError::Build(BuildError::InvalidSource(_)))
        ));
    }

    #[tokio::test]
    async fn test_load_account_transport_failure_is_load_stage() {
        let mut provider = MockHorizonProviderTrait::new();
        provider.expect_load_account().returning(|_| {
            Box::pin(async { Err(ProviderError::TransportError("connection refused".into())) })
        });
        provider.expect_submit_transaction().never();
        let client = client(provider);

        let err = client
            .load_account(&KeyPair::random().address)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TxError::Load(ProviderError::TransportError("connection refused".into()))
        );
        assert_eq!(err.stage(), crate::models::TxStage::Load);
    }

    #[tokio::test]
    async fn test_load_account_twice_is_stable() {
        let client = MicroStellar::new(NetworkConfig::Simulated).unwrap();
        let a = client.create_keypair();
        let first = client.load_account(&a.address).await.unwrap();
        let second = client.load_account(&a.address).await.unwrap();
        assert_eq!(first, second);
    }
}
