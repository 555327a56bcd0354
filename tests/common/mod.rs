//! Shared stubs for exercising the deployment pipeline without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{address, b256, Address, TxHash};
use async_trait::async_trait;

use lottery_deployer::blockchain::{
    ChainClient, ContractFactory, DeployError, DeployReceipt, DeployResult, NetworkInfo,
    PendingContract, Wallet,
};
use lottery_deployer::config::VrfParams;

// Anvil's first two well-known accounts.
pub const KEY_0: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY_1: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const STUB_ADDRESS: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const STUB_TX_HASH: TxHash =
    b256!("1111111111111111111111111111111111111111111111111111111111111111");

/// Stage at which the stub factory fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nothing,
    Submit,
    Inclusion,
    Receipt,
}

/// In-memory chain client.
pub struct StubChainClient {
    pub chain_id: u64,
    pub signers: Vec<Wallet>,
    pub fail_network: bool,
    /// Number of times the signer list was consulted.
    pub signer_queries: Arc<AtomicUsize>,
}

impl StubChainClient {
    pub fn new(chain_id: u64, signers: Vec<Wallet>) -> Self {
        Self {
            chain_id,
            signers,
            fail_network: false,
            signer_queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            chain_id: 0,
            signers: Vec::new(),
            fail_network: true,
            signer_queries: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ChainClient for StubChainClient {
    async fn network(&self) -> DeployResult<NetworkInfo> {
        if self.fail_network {
            return Err(DeployError::Network("no network reachable".to_string()));
        }
        Ok(NetworkInfo::new(self.chain_id))
    }

    async fn signers(&self) -> DeployResult<Vec<Wallet>> {
        self.signer_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.signers.clone())
    }
}

/// Stub factory recording the constructor arguments it receives.
pub struct StubFactory {
    pub fail_at: FailAt,
    /// Positional argument list as the contract would receive it.
    pub recorded_args: Arc<Mutex<Option<[String; 6]>>>,
}

impl StubFactory {
    pub fn new() -> Self {
        Self::failing_at(FailAt::Nothing)
    }

    pub fn failing_at(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            recorded_args: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl ContractFactory for StubFactory {
    async fn deploy(
        &self,
        _wallet: &Wallet,
        params: &VrfParams,
    ) -> DeployResult<Box<dyn PendingContract>> {
        *self.recorded_args.lock().unwrap() = Some(params.constructor_args());

        if self.fail_at == FailAt::Submit {
            return Err(DeployError::Submission(
                "creation transaction rejected".to_string(),
            ));
        }

        Ok(Box::new(StubPending {
            fail_at: self.fail_at,
        }))
    }
}

struct StubPending {
    fail_at: FailAt,
}

#[async_trait]
impl PendingContract for StubPending {
    fn address(&self) -> Address {
        STUB_ADDRESS
    }

    fn tx_hash(&self) -> TxHash {
        STUB_TX_HASH
    }

    async fn deployed(&self) -> DeployResult<()> {
        if self.fail_at == FailAt::Inclusion {
            return Err(DeployError::Confirmation(
                "creation transaction dropped".to_string(),
            ));
        }
        Ok(())
    }

    async fn receipt(&self) -> DeployResult<DeployReceipt> {
        if self.fail_at == FailAt::Receipt {
            return Err(DeployError::Confirmation(
                "receipt wait timed out at the client layer".to_string(),
            ));
        }
        Ok(DeployReceipt {
            block_number: 1042,
            gas_used: 1_523_412,
        })
    }
}
