//! Full pipeline against a mock Horizon server.
use microstellar::{
    config::{LiveNetwork, NetworkConfig},
    domain::MicroStellar,
    models::{error_string, BuildError, KeyPair, SourceAccount, TxError, TxStage},
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn client(server: &ServerGuard) -> MicroStellar {
    MicroStellar::new(NetworkConfig::Live(LiveNetwork {
        horizon_url: server.url(),
        timeout_seconds: 5,
        ..LiveNetwork::testnet()
    }))
    .expect("live client")
}

async fn mock_account(server: &mut ServerGuard, address: &str, sequence: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/accounts/{address}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "account_id": address,
                "sequence": sequence,
                "balances": [{"balance": "100.0000000", "asset_type": "native"}],
                "signers": [{"weight": 1, "key": address, "type": "ed25519_public_key"}],
                "thresholds": {"low_threshold": 0, "med_threshold": 0, "high_threshold": 0},
                "flags": {"auth_required": false, "auth_revocable": false, "auth_immutable": false}
            })
            .to_string(),
        )
        .create_async()
        .await
}

#[tokio::test]
async fn test_pay_native_is_submitted() {
    let mut server = Server::new_async().await;
    let a = KeyPair::random();
    let b = KeyPair::random();
    let account = mock_account(&mut server, &a.address, "99").await;
    let submit = server
        .mock("POST", "/transactions")
        .match_body(Matcher::Regex("^tx=".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"hash": "c0ffee", "ledger": 3}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let result = client
        .pay_native(&SourceAccount::Seed(a.seed), &b.address, "5", &[])
        .await;

    assert_eq!(result, Ok(()));
    account.assert_async().await;
    submit.assert_async().await;
}

#[tokio::test]
async fn test_rejection_is_inspectable() {
    let mut server = Server::new_async().await;
    let a = KeyPair::random();
    let b = KeyPair::random();
    let _account = mock_account(&mut server, &a.address, "1").await;
    let _submit = server
        .mock("POST", "/transactions")
        .with_status(400)
        .with_header("content-type", "application/problem+json")
        .with_body(
            json!({
                "type": "https://stellar.org/horizon-errors/transaction_failed",
                "title": "Transaction Failed",
                "status": 400,
                "detail": "The transaction failed when submitted to the stellar network.",
                "extras": {
                    "result_codes": {"transaction": "tx_failed", "operations": ["op_underfunded"]},
                    "result_xdr": "AAAAAAAAAGT/////AAAAAQAAAAAAAAAB/////gAAAAA="
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client(&server);
    let err = client
        .pay_native(&SourceAccount::Seed(a.seed), &b.address, "5000", &[])
        .await
        .unwrap_err();

    let rejection = err.rejection().expect("rejection payload");
    assert_eq!(rejection.status, 400);
    assert_eq!(
        rejection.result_codes.as_ref().map(|c| c.operations.clone()),
        Some(vec!["op_underfunded".to_string()])
    );
    assert_eq!(error_string(&err), "tx_failed: [op_underfunded]");
}

#[tokio::test]
async fn test_missing_source_account() {
    let mut server = Server::new_async().await;
    let a = KeyPair::random();
    let b = KeyPair::random();
    let _account = server
        .mock("GET", format!("/accounts/{}", a.address).as_str())
        .with_status(404)
        .with_body(json!({"title": "Resource Missing", "status": 404}).to_string())
        .create_async()
        .await;
    let submit = server
        .mock("POST", "/transactions")
        .expect(0)
        .create_async()
        .await;

    let client = client(&server);
    let err = client
        .pay_native(&SourceAccount::Seed(a.seed), &b.address, "1", &[])
        .await
        .unwrap_err();
    assert_eq!(err, TxError::Build(BuildError::SourceNotFound(a.address.clone())));

    assert_eq!(
        client.load_account(&a.address).await,
        Err(TxError::NotFound(a.address.clone()))
    );
    submit.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let mut server = Server::new_async().await;
    let a = KeyPair::random();
    let b = KeyPair::random();
    let _account = mock_account(&mut server, &a.address, "1").await;
    let _submit = server
        .mock("POST", "/transactions")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let client = client(&server);
    let err = client
        .pay_native(&SourceAccount::Seed(a.seed), &b.address, "1", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::Submit(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unreachable_horizon_fails_at_load_stage() {
    let client = MicroStellar::new(NetworkConfig::Live(LiveNetwork {
        horizon_url: "http://127.0.0.1:1".to_string(),
        timeout_seconds: 5,
        ..LiveNetwork::testnet()
    }))
    .expect("live client");
    let a = KeyPair::random();

    let err = client.load_account(&a.address).await.unwrap_err();
    assert!(matches!(err, TxError::Load(_)), "unexpected error {err:?}");
    assert_eq!(err.stage(), TxStage::Load);
    assert!(err.is_transient());
}
