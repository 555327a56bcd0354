//! Chain access subsystem.
//!
//! # Data Flow
//! ```text
//! resolved configuration (RPC key, private key)
//!     → wallet.rs (signing identity)
//!     → client.rs (network identity, signer enumeration)
//!     → factory.rs (creation transaction, inclusion + receipt waits)
//! ```
//!
//! # Security Constraints
//! - Private keys only from resolved configuration
//! - Never log private keys or derived secrets
//! - Every RPC call carries a client-layer timeout

pub mod client;
pub mod factory;
pub mod types;
pub mod wallet;

pub use client::{ChainClient, RpcChainClient};
pub use factory::{ArtifactFactory, ContractFactory, PendingContract};
pub use types::{DeployError, DeployReceipt, DeployResult, NetworkInfo};
pub use wallet::Wallet;
