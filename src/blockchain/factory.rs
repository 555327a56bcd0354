//! Contract-creation factory.
//!
//! # Responsibilities
//! - Load creation bytecode from an externally compiled build artifact
//! - ABI-encode the six constructor values in their positional order
//! - Submit the creation transaction and expose a pending handle
//! - Wait for inclusion and surface the confirmation receipt
//!
//! The factory and pending-contract traits are the seams the deployment
//! pipeline is tested through; stubs substitute for the RPC-backed
//! implementations.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::{interval, timeout};

use crate::blockchain::types::{DeployError, DeployReceipt, DeployResult};
use crate::blockchain::wallet::Wallet;
use crate::config::{ConfigError, VrfParams};

/// Capability interface for submitting a contract-creation transaction.
#[async_trait]
pub trait ContractFactory: Send + Sync {
    /// Submit the creation transaction with the six constructor values.
    ///
    /// Returns a pending handle carrying the transaction hash and the
    /// contract address; it does not guarantee on-chain inclusion yet.
    async fn deploy(
        &self,
        wallet: &Wallet,
        params: &VrfParams,
    ) -> DeployResult<Box<dyn PendingContract>>;
}

/// A submitted-but-not-yet-confirmed contract deployment.
#[async_trait]
pub trait PendingContract: Send + Sync {
    /// Address the contract will live at.
    fn address(&self) -> Address;

    /// Hash of the creation transaction.
    fn tx_hash(&self) -> TxHash;

    /// Suspend until the creation transaction is included.
    async fn deployed(&self) -> DeployResult<()>;

    /// Suspend until the confirmation receipt is available.
    async fn receipt(&self) -> DeployResult<DeployReceipt>;
}

/// Minimal view of a compiled contract build artifact.
#[derive(Debug, Deserialize)]
struct Artifact {
    bytecode: String,
}

/// Factory backed by a build artifact and a JSON-RPC endpoint.
pub struct ArtifactFactory {
    bytecode: Bytes,
    rpc_url: url::Url,
    rpc_timeout: Duration,
    confirmation_timeout: Duration,
}

impl ArtifactFactory {
    /// Load creation bytecode from a build artifact on disk.
    ///
    /// # Arguments
    /// * `path` - JSON artifact containing a hex `bytecode` field
    /// * `rpc_url` - HTTP JSON-RPC endpoint for submission
    /// * `rpc_timeout_secs` - Per-request timeout
    /// * `confirmation_timeout_secs` - Deadline for the receipt wait
    pub fn from_file(
        path: &Path,
        rpc_url: &str,
        rpc_timeout_secs: u64,
        confirmation_timeout_secs: u64,
    ) -> DeployResult<Self> {
        let artifact_err = |reason: String| {
            DeployError::Config(ConfigError::Artifact {
                path: path.display().to_string(),
                reason,
            })
        };

        let content = std::fs::read_to_string(path).map_err(|e| artifact_err(e.to_string()))?;
        let artifact: Artifact =
            serde_json::from_str(&content).map_err(|e| artifact_err(e.to_string()))?;
        let bytecode: Bytes = artifact
            .bytecode
            .parse()
            .map_err(|_| artifact_err("bytecode is not valid hex".to_string()))?;

        let rpc_url: url::Url = rpc_url
            .parse()
            .map_err(|e| DeployError::Network(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        Ok(Self {
            bytecode,
            rpc_url,
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            confirmation_timeout: Duration::from_secs(confirmation_timeout_secs),
        })
    }

    /// Creation bytecode with the constructor arguments appended.
    fn creation_code(&self, params: &VrfParams) -> Bytes {
        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&constructor_calldata(params));
        code.into()
    }
}

/// ABI-encode the constructor values in their declared positional order.
///
/// The target constructor matches by position, so the tuple order here is
/// the contract's argument order: coordinator, fee token, key hash,
/// subscription id, callback gas limit, request confirmations.
pub fn constructor_calldata(params: &VrfParams) -> Vec<u8> {
    (
        params.vrf_coordinator,
        params.link_token,
        params.key_hash,
        params.subscription_id,
        params.callback_gas_limit,
        params.request_confirmations,
    )
        .abi_encode_params()
}

#[async_trait]
impl ContractFactory for ArtifactFactory {
    async fn deploy(
        &self,
        wallet: &Wallet,
        params: &VrfParams,
    ) -> DeployResult<Box<dyn PendingContract>> {
        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(self.rpc_url.clone());
        let provider: Arc<dyn Provider + Send + Sync> = Arc::new(provider);

        let nonce = timeout(
            self.rpc_timeout,
            provider.get_transaction_count(wallet.address()),
        )
        .await
        .map_err(|_| DeployError::Submission("Nonce query timed out".to_string()))?
        .map_err(|e| DeployError::Submission(format!("Nonce query failed: {}", e)))?;

        let tx = TransactionRequest::default()
            .with_deploy_code(self.creation_code(params))
            .with_nonce(nonce);

        let pending = timeout(self.rpc_timeout, provider.send_transaction(tx))
            .await
            .map_err(|_| DeployError::Submission("Broadcast timed out".to_string()))?
            .map_err(|e| DeployError::Submission(format!("Broadcast rejected: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        // The creation address is fixed by sender and nonce, so it is known
        // before inclusion.
        let address = wallet.address().create(nonce);

        tracing::debug!(tx_hash = %tx_hash, address = %address, nonce, "Creation transaction sent");

        Ok(Box::new(RpcPendingContract {
            provider,
            tx_hash,
            address,
            rpc_timeout: self.rpc_timeout,
            confirmation_timeout: self.confirmation_timeout,
            confirmed: Mutex::new(None),
        }))
    }
}

/// RPC-backed pending deployment, polling for the creation receipt.
struct RpcPendingContract {
    provider: Arc<dyn Provider + Send + Sync>,
    tx_hash: TxHash,
    address: Address,
    rpc_timeout: Duration,
    confirmation_timeout: Duration,
    confirmed: Mutex<Option<DeployReceipt>>,
}

impl RpcPendingContract {
    /// Poll for the receipt until inclusion or the confirmation deadline.
    async fn await_receipt(&self) -> DeployResult<DeployReceipt> {
        if let Some(receipt) = *self.confirmed.lock().unwrap_or_else(|e| e.into_inner()) {
            return Ok(receipt);
        }

        let poll_interval = Duration::from_secs(2);

        let result = timeout(self.confirmation_timeout, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = timeout(
                    self.rpc_timeout,
                    self.provider.get_transaction_receipt(self.tx_hash),
                )
                .await
                .map_err(|_| DeployError::Confirmation("Receipt query timed out".to_string()))?
                .map_err(|e| DeployError::Confirmation(format!("Receipt query failed: {}", e)))?;

                let receipt = match receipt {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %self.tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(DeployError::Confirmation(
                        "Creation transaction reverted".to_string(),
                    ));
                }

                return Ok(DeployReceipt {
                    block_number: receipt.block_number.unwrap_or_default(),
                    gas_used: receipt.gas_used,
                });
            }
        })
        .await;

        let receipt = match result {
            Ok(receipt) => receipt?,
            Err(_) => {
                return Err(DeployError::Confirmation(format!(
                    "Transaction not confirmed within {}s",
                    self.confirmation_timeout.as_secs()
                )))
            }
        };

        *self.confirmed.lock().unwrap_or_else(|e| e.into_inner()) = Some(receipt);
        Ok(receipt)
    }
}

#[async_trait]
impl PendingContract for RpcPendingContract {
    fn address(&self) -> Address {
        self.address
    }

    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn deployed(&self) -> DeployResult<()> {
        self.await_receipt().await.map(|_| ())
    }

    async fn receipt(&self) -> DeployResult<DeployReceipt> {
        self.await_receipt().await
    }
}
