//! Run outcome reporting.
//!
//! The rendered summary and the verification command are the externally
//! observable artifact of a run, so they go to stdout rather than the
//! structured log stream.

use alloy::primitives::{Address, TxHash};

use crate::config::{GasReportConfig, VrfParams};

/// Outcome of one completed deployment. Read-only after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub chain_id: u64,
    pub network_name: String,
    pub signer: Address,
    pub contract_address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
}

impl DeploymentResult {
    /// The copyable follow-up command verifying the deployed contract.
    ///
    /// Concatenates the network name, the deployed address, and the six
    /// constructor parameters as quoted positional arguments in the order
    /// the constructor received them.
    pub fn verification_command(&self, params: &VrfParams) -> String {
        format!(
            "npx hardhat verify --network {} {} \"{}\"",
            self.network_name,
            self.contract_address,
            params.constructor_args().join("\" \"")
        )
    }

    /// Render the human-readable run summary.
    pub fn render(&self, params: &VrfParams, gas_report: &GasReportConfig) -> String {
        let mut lines = vec![
            format!("Network chain id: {}", self.chain_id),
            format!("Network name: {}", self.network_name),
            format!("Signer address: {}", self.signer),
            format!("Deployed to address: {}", self.contract_address),
            format!("Transaction id: {}", self.tx_hash),
            format!("Transaction confirmed in block: {}", self.block_number),
        ];

        if gas_report.enabled {
            lines.push(format!("Transaction gas used: {}", self.gas_used));
        }

        lines.push(String::new());
        lines.push("Etherscan verify script:".to_string());
        lines.push(self.verification_command(params));

        lines.join("\n")
    }
}

/// Print the final report to stdout.
pub fn print_report(result: &DeploymentResult, params: &VrfParams, gas_report: &GasReportConfig) {
    println!("{}", result.render(params, gas_report));
}
