//! One-shot lottery-factory deployer.
//!
//! Resolves environment-supplied configuration into typed parameters and
//! drives a single contract-creation transaction to completion.
//!
//! # Architecture Overview
//!
//! ```text
//! .env / environment variables
//!     → config   (schema resolution: secrets, VRF params, reporting)
//!     → blockchain
//!         wallet.rs   signing identity
//!         client.rs   network identity, signer list
//!         factory.rs  creation tx, inclusion + receipt waits
//!     → deploy
//!         orchestrator.rs  network → signer → submit → include → confirm
//!         report.rs        summary + verification command
//! ```
//!
//! Each run owns its configuration and pipeline state exclusively; one
//! chain request is in flight at a time, and any step failure aborts the
//! process with a non-zero exit.

pub mod blockchain;
pub mod config;
pub mod deploy;

pub use blockchain::{ChainClient, ContractFactory, DeployError, Wallet};
pub use config::{GasReportConfig, SecretConfig, VrfParams};
pub use deploy::DeploymentResult;
