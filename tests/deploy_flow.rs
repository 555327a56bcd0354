//! End-to-end pipeline scenarios against in-memory stubs.

use std::collections::HashMap;
use std::sync::atomic::Ordering;

use lottery_deployer::blockchain::{DeployError, Wallet};
use lottery_deployer::config::{GasReportConfig, SecretConfig, VrfParams};
use lottery_deployer::deploy;

mod common;

use common::{FailAt, StubChainClient, StubFactory, KEY_0, KEY_1, STUB_ADDRESS, STUB_TX_HASH};

fn distinct_params() -> VrfParams {
    let env = HashMap::from([
        (
            "VRF_COORDINATOR".to_string(),
            "0x6168499c0cFfCaCD319c818142124B7A15E857ab".to_string(),
        ),
        (
            "LINK_TOKEN".to_string(),
            "0x01BE23585060835E02B77ef475b0Cc51aA1e0709".to_string(),
        ),
        ("SUBSCRIPTION_ID".to_string(), "7".to_string()),
        ("CALLBACK_GAS_LIMIT".to_string(), "200000".to_string()),
        ("REQUEST_CONFIRMATIONS".to_string(), "5".to_string()),
    ]);
    VrfParams::from_source(&env).unwrap()
}

#[tokio::test]
async fn test_happy_path_produces_full_result() {
    let client = StubChainClient::new(4, Vec::new());
    let factory = StubFactory::new();
    let params = distinct_params();

    let result = deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap();

    assert_eq!(result.chain_id, 4);
    assert_eq!(result.network_name, "rinkeby");
    assert_eq!(
        result.signer,
        Wallet::from_private_key(KEY_0).unwrap().address()
    );
    assert_eq!(result.contract_address, STUB_ADDRESS);
    assert_eq!(result.tx_hash, STUB_TX_HASH);
    assert_eq!(result.block_number, 1042);
    assert_eq!(result.gas_used, 1_523_412);
}

#[tokio::test]
async fn test_final_line_is_ordered_verification_command() {
    let client = StubChainClient::new(4, Vec::new());
    let factory = StubFactory::new();
    let params = distinct_params();

    let result = deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap();
    let gas = GasReportConfig::from_source(&HashMap::<String, String>::new()).unwrap();

    let rendered = result.render(&params, &gas);
    let last_line = rendered.lines().last().unwrap();

    assert!(last_line.contains("--network rinkeby"));
    assert!(last_line.contains(&STUB_ADDRESS.to_string()));

    let quoted: Vec<String> = params
        .constructor_args()
        .iter()
        .map(|a| format!("\"{}\"", a))
        .collect();
    assert!(last_line.ends_with(&quoted.join(" ")));
}

#[tokio::test]
async fn test_constructor_arguments_arrive_in_declared_order() {
    let client = StubChainClient::new(4, Vec::new());
    let factory = StubFactory::new();
    let params = distinct_params();

    deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap();

    let recorded = factory.recorded_args.lock().unwrap().clone().unwrap();
    assert_eq!(
        recorded,
        [
            params.vrf_coordinator.to_string(),
            params.link_token.to_string(),
            params.key_hash.to_string(),
            "7".to_string(),
            "200000".to_string(),
            "5".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_permuted_parameters_are_detectable() {
    let params = distinct_params();
    let mut permuted = params;
    permuted.vrf_coordinator = params.link_token;
    permuted.link_token = params.vrf_coordinator;

    let client = StubChainClient::new(4, Vec::new());
    let factory = StubFactory::new();
    deploy::run(&client, &factory, Some(KEY_0), &permuted)
        .await
        .unwrap();

    let recorded = factory.recorded_args.lock().unwrap().clone().unwrap();
    assert_ne!(recorded, params.constructor_args());
    assert_eq!(recorded[0], params.link_token.to_string());
}

#[tokio::test]
async fn test_explicit_key_skips_signer_list() {
    // Scenario A: a configured key builds the signer directly; the
    // pre-authorized list is never consulted.
    let client = StubChainClient::new(4, vec![Wallet::from_private_key(KEY_1).unwrap()]);
    let factory = StubFactory::new();
    let params = distinct_params();

    let result = deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap();

    assert_eq!(
        result.signer,
        Wallet::from_private_key(KEY_0).unwrap().address()
    );
    assert_eq!(client.signer_queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fallback_uses_first_preauthorized_signer() {
    let client = StubChainClient::new(4, vec![
        Wallet::from_private_key(KEY_1).unwrap(),
        Wallet::from_private_key(KEY_0).unwrap(),
    ]);
    let factory = StubFactory::new();
    let params = distinct_params();

    let result = deploy::run(&client, &factory, None, &params).await.unwrap();

    assert_eq!(
        result.signer,
        Wallet::from_private_key(KEY_1).unwrap().address()
    );
    assert_eq!(client.signer_queries.load(Ordering::SeqCst), 1);
}

#[test]
fn test_missing_api_key_fails_before_any_network_step() {
    // Scenario B: resolution fails naming the variable; no client or
    // factory is ever constructed.
    let env = HashMap::from([
        ("ETHERSCAN_API_KEY".to_string(), "etherscan".to_string()),
        ("PRIVATE_KEY".to_string(), KEY_0.to_string()),
    ]);

    let err = SecretConfig::from_source(&env).unwrap_err();
    assert!(err.to_string().contains("INFURA_API_KEY"));
}

#[tokio::test]
async fn test_unreachable_network_is_fatal() {
    let client = StubChainClient::unreachable();
    let factory = StubFactory::new();
    let params = distinct_params();

    let err = deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::Network(_)));
    assert!(factory.recorded_args.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_rejected_submission_is_fatal() {
    let client = StubChainClient::new(4, Vec::new());
    let factory = StubFactory::failing_at(FailAt::Submit);
    let params = distinct_params();

    let err = deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::Submission(_)));
}

#[tokio::test]
async fn test_dropped_transaction_fails_inclusion_wait() {
    let client = StubChainClient::new(4, Vec::new());
    let factory = StubFactory::failing_at(FailAt::Inclusion);
    let params = distinct_params();

    let err = deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::Confirmation(_)));
}

#[tokio::test]
async fn test_receipt_timeout_yields_no_report() {
    // Scenario C: inclusion succeeds but the receipt wait times out at the
    // client layer; the run fails with a confirmation error and no
    // verification command is ever produced.
    let client = StubChainClient::new(4, Vec::new());
    let factory = StubFactory::failing_at(FailAt::Receipt);
    let params = distinct_params();

    let err = deploy::run(&client, &factory, Some(KEY_0), &params)
        .await
        .unwrap_err();

    match err {
        DeployError::Confirmation(detail) => assert!(detail.contains("timed out")),
        other => panic!("expected confirmation error, got {other}"),
    }
}
