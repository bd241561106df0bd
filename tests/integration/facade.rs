//! Facade calls against the simulated network.
use microstellar::{
    config::NetworkConfig,
    domain::{MicroStellar, TxMutator},
    models::{
        AccountFlag, Asset, BuildError, Memo, OperationSpec, Payment, Seed, SourceAccount,
        TxError, TxStage,
    },
};

fn client() -> MicroStellar {
    MicroStellar::new(NetworkConfig::Simulated).expect("simulated client")
}

#[tokio::test]
async fn test_fund_account() {
    let client = client();
    let a = client.create_keypair();
    let b = client.create_keypair();

    let result = client
        .fund_account(&SourceAccount::Seed(a.seed), &b.address, "1.5", &[])
        .await;
    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_zero_and_malformed_amounts_fail_to_build() {
    let client = client();
    let a = client.create_keypair();
    let b = client.create_keypair();
    let source = SourceAccount::Seed(a.seed);

    for amount in ["0", "-1", "1.12345678", "abc", ""] {
        let err = client
            .pay_native(&source, &b.address, amount, &[])
            .await
            .unwrap_err();
        assert_eq!(err.stage(), TxStage::Build, "amount {amount:?}");
    }
}

#[tokio::test]
async fn test_trust_lines() {
    let client = client();
    let a = SourceAccount::Seed(client.create_keypair().seed);
    let issuer = client.create_keypair();
    let usd = Asset::credit("USD", &issuer.address);

    assert_eq!(client.create_trust_line(&a, &usd, "", &[]).await, Ok(()));
    assert_eq!(client.create_trust_line(&a, &usd, "1000", &[]).await, Ok(()));
    assert_eq!(client.remove_trust_line(&a, &usd, &[]).await, Ok(()));
    assert!(matches!(
        client.create_trust_line(&a, &usd, "0", &[]).await,
        Err(TxError::Build(BuildError::InvalidAmount(_)))
    ));
}

#[tokio::test]
async fn test_signers_are_skipped_on_simulated_network() {
    let client = client();
    let a = client.create_keypair();
    let b = client.create_keypair();
    let c = client.create_keypair();
    let source = SourceAccount::Address(a.address.clone());

    assert_eq!(
        client.add_signer(&source, &c.address, 1, &[b.seed.clone()]).await,
        Ok(())
    );
    assert_eq!(client.add_signer(&source, &c.address, 1, &[]).await, Ok(()));
    assert_eq!(
        client
            .add_signer(&source, &c.address, 1, &[Seed::new(a.address.as_str())])
            .await,
        Ok(())
    );
}

#[tokio::test]
async fn test_account_options() {
    let client = client();
    let a = client.create_keypair();
    let c = client.create_keypair();
    let source = SourceAccount::Seed(a.seed);

    assert_eq!(client.set_master_weight(&source, 10, &[]).await, Ok(()));
    assert_eq!(client.set_thresholds(&source, 1, 5, 10, &[]).await, Ok(()));
    assert_eq!(client.remove_signer(&source, &c.address, &[]).await, Ok(()));
    assert_eq!(
        client.set_home_domain(&source, "example.com", &[]).await,
        Ok(())
    );
    assert_eq!(
        client
            .set_flags(&source, &[AccountFlag::AuthRequired], &[])
            .await,
        Ok(())
    );
    assert_eq!(
        client
            .clear_flags(&source, &[AccountFlag::AuthRequired], &[])
            .await,
        Ok(())
    );
    assert!(matches!(
        client.set_thresholds(&source, 1, 5, 256, &[]).await,
        Err(TxError::Build(BuildError::InvalidOperation(_)))
    ));
}

#[tokio::test]
async fn test_payment_with_credit_asset_and_memo() {
    let client = client();
    let a = client.create_keypair();
    let b = client.create_keypair();
    let issuer = client.create_keypair();

    let payment = Payment::new(SourceAccount::Seed(a.seed.clone()), &b.address, "12.5")
        .with_asset(Asset::credit("EURT", &issuer.address))
        .with_memo_text("invoice 42");
    assert_eq!(client.pay(payment).await, Ok(()));

    let too_long = Payment::new(SourceAccount::Seed(a.seed), &b.address, "1")
        .with_memo_text("x".repeat(29));
    assert!(matches!(
        client.pay(too_long).await,
        Err(TxError::Build(BuildError::InvalidMemo(_)))
    ));
}

#[tokio::test]
async fn test_multi_operation_submit_returns_hash() {
    let client = client();
    let a = client.create_keypair();
    let b = client.create_keypair();
    let c = client.create_keypair();

    let response = client
        .submit(
            &SourceAccount::Seed(a.seed),
            vec![
                TxMutator::Memo(Memo::Id(7)),
                OperationSpec::CreateAccount {
                    destination: b.address.clone(),
                    starting_balance: "2".to_string(),
                }
                .into(),
                OperationSpec::Payment {
                    destination: c.address.clone(),
                    asset: Asset::native(),
                    amount: "0.0000001".to_string(),
                }
                .into(),
            ],
            &[],
        )
        .await
        .unwrap();

    assert_eq!(response.hash.len(), 64);
    assert!(response.envelope_xdr.is_some());
}

#[tokio::test]
async fn test_load_account_is_zero_valued_and_stable() {
    let client = client();
    let a = client.create_keypair();

    let first = client.load_account(&a.address).await.unwrap();
    let second = client.load_account(&a.address).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.address, a.address);
    assert_eq!(first.get_native_balance(), "0");
}
