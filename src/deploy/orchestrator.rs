//! The deployment pipeline.
//!
//! A linear sequence of fallible steps, each awaited to completion before
//! the next begins: network identity → signer → parameter assembly →
//! submission → inclusion wait → receipt wait. Every step's failure is
//! terminal; nothing is retried.

use crate::blockchain::{
    ChainClient, ContractFactory, DeployError, DeployResult, NetworkInfo, Wallet,
};
use crate::config::VrfParams;
use crate::deploy::report::DeploymentResult;

/// Query the connected network's identity.
pub async fn acquire_network(client: &dyn ChainClient) -> DeployResult<NetworkInfo> {
    tracing::info!("Querying network");
    let network = client.network().await?;
    tracing::info!(chain_id = network.chain_id, name = %network.name, "Network acquired");
    Ok(network)
}

/// Select the signing identity for the deployment transaction.
///
/// An explicitly configured private key always wins; the pre-authorized
/// signer list is consulted only when no key is supplied, taking its first
/// entry.
pub async fn acquire_signer(
    client: &dyn ChainClient,
    explicit_key: Option<&str>,
) -> DeployResult<Wallet> {
    tracing::info!("Acquiring signer");

    let wallet = match explicit_key {
        Some(key) => Wallet::from_private_key(key)?,
        None => client
            .signers()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DeployError::Network("No signing identity available".to_string()))?,
    };

    tracing::info!(address = %wallet.address(), "Signer acquired");
    Ok(wallet)
}

/// Drive one contract deployment from start to confirmed receipt.
pub async fn run(
    client: &dyn ChainClient,
    factory: &dyn ContractFactory,
    explicit_key: Option<&str>,
    params: &VrfParams,
) -> DeployResult<DeploymentResult> {
    let network = acquire_network(client).await?;
    let wallet = acquire_signer(client, explicit_key).await?;

    // The six constructor values pass through in their fixed order; no
    // transformation happens here.
    tracing::info!(params = ?params.constructor_args(), "Deploying contract");

    let pending = factory.deploy(&wallet, params).await?;
    tracing::info!(
        address = %pending.address(),
        tx_hash = %pending.tx_hash(),
        "Creation transaction submitted"
    );

    tracing::info!("Waiting for inclusion");
    pending.deployed().await?;

    tracing::info!("Waiting for confirmation receipt");
    let receipt = pending.receipt().await?;
    tracing::info!(
        block_number = receipt.block_number,
        gas_used = receipt.gas_used,
        "Transaction confirmed"
    );

    Ok(DeploymentResult {
        chain_id: network.chain_id,
        network_name: network.name,
        signer: wallet.address(),
        contract_address: pending.address(),
        tx_hash: pending.tx_hash(),
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}
