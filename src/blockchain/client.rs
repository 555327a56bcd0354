//! Chain client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint
//! - Query the connected network's identity
//! - Enumerate the pre-authorized signing identities
//!
//! The trait is deliberately narrow so the deployment pipeline can be
//! exercised against an in-memory stub without a live network.

use std::time::Duration;

use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::types::{DeployError, DeployResult, NetworkInfo};
use crate::blockchain::wallet::Wallet;

/// Capability interface for network identity and signer enumeration.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Chain id and name of the connected network.
    async fn network(&self) -> DeployResult<NetworkInfo>;

    /// Pre-authorized signing identities available to this run.
    async fn signers(&self) -> DeployResult<Vec<Wallet>>;
}

/// JSON-RPC backed client.
pub struct RpcChainClient {
    provider: Box<dyn Provider + Send + Sync>,
    signers: Vec<Wallet>,
    timeout_duration: Duration,
}

impl RpcChainClient {
    /// Connect to an RPC endpoint.
    ///
    /// # Arguments
    /// * `rpc_url` - HTTP JSON-RPC endpoint
    /// * `signers` - Pre-configured signing identities, first entry preferred
    /// * `rpc_timeout_secs` - Per-request timeout
    pub fn new(rpc_url: &str, signers: Vec<Wallet>, rpc_timeout_secs: u64) -> DeployResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| DeployError::Network(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider = Box::new(ProviderBuilder::new().connect_http(url));

        Ok(Self {
            provider,
            signers,
            timeout_duration: Duration::from_secs(rpc_timeout_secs),
        })
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn network(&self) -> DeployResult<NetworkInfo> {
        let fut = self.provider.get_chain_id();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(chain_id)) => Ok(NetworkInfo::new(chain_id)),
            Ok(Err(e)) => Err(DeployError::Network(format!("Chain id query failed: {}", e))),
            Err(_) => Err(DeployError::Network(format!(
                "Chain id query timed out after {}s",
                self.timeout_duration.as_secs()
            ))),
        }
    }

    async fn signers(&self) -> DeployResult<Vec<Wallet>> {
        Ok(self.signers.clone())
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("signers", &self.signers.len())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
