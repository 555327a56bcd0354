//! Chain-specific types and error definitions.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while driving a deployment.
///
/// Every variant is fatal; the pipeline never retries. Each maps to one
/// stage of the run: configuration before any network activity, network
/// identity and signer acquisition, transaction submission, and the
/// inclusion/receipt waits.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Missing or malformed environment configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chain identity or signer acquisition failed.
    #[error("network unavailable: {0}")]
    Network(String),

    /// The creation transaction was rejected or failed to broadcast.
    #[error("deployment submission failed: {0}")]
    Submission(String),

    /// The transaction broadcast but was never included or confirmed.
    #[error("confirmation failed: {0}")]
    Confirmation(String),
}

/// Result type for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// Identity of the connected network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: String,
}

impl NetworkInfo {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            name: network_name(chain_id).to_string(),
        }
    }
}

/// Canonical name for a chain id, `"unknown"` for unrecognized networks.
pub fn network_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "mainnet",
        4 => "rinkeby",
        5 => "goerli",
        11155111 => "sepolia",
        31337 => "anvil",
        _ => "unknown",
    }
}

/// Confirmation data read from the creation transaction's receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployReceipt {
    /// Block the transaction was confirmed in.
    pub block_number: u64,

    /// Gas consumed by the creation transaction.
    pub gas_used: u64,
}
