//! Binary entry point: resolve configuration, deploy once, report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lottery_deployer::blockchain::{ArtifactFactory, DeployError, RpcChainClient, Wallet};
use lottery_deployer::config::{self, GasReportConfig, ProcessEnv, SecretConfig, VrfParams};
use lottery_deployer::deploy;

#[derive(Parser)]
#[command(name = "lottery-deployer")]
#[command(about = "Deploys the VRF lottery factory contract", long_about = None)]
struct Cli {
    /// Contract build artifact containing the creation bytecode.
    #[arg(long, default_value = "artifacts/LotteryFactory.json")]
    artifact: PathBuf,

    /// Environment file merged into the process environment before
    /// resolution.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Per-request RPC timeout in seconds.
    #[arg(long, default_value_t = 10)]
    rpc_timeout_secs: u64,

    /// Deadline for the confirmation receipt in seconds.
    #[arg(long, default_value_t = 300)]
    confirmation_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lottery_deployer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Deployment failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), DeployError> {
    config::merge_env_file(cli.env_file.as_deref());

    // Resolution happens exactly once, before any network activity.
    let secrets = SecretConfig::from_source(&ProcessEnv)?;
    let params = VrfParams::from_source(&ProcessEnv)?;
    let gas_report = GasReportConfig::from_source(&ProcessEnv)?;

    tracing::info!(
        artifact = %cli.artifact.display(),
        subscription_id = params.subscription_id,
        callback_gas_limit = params.callback_gas_limit,
        request_confirmations = params.request_confirmations,
        "Configuration resolved"
    );

    // The configured key also seeds the client's pre-authorized signer
    // list, mirroring the network account setup the key came from.
    let wallet = Wallet::from_private_key(&secrets.private_key)?;
    let client = RpcChainClient::new(&secrets.rpc_url(), vec![wallet], cli.rpc_timeout_secs)?;
    let factory = ArtifactFactory::from_file(
        &cli.artifact,
        &secrets.rpc_url(),
        cli.rpc_timeout_secs,
        cli.confirmation_timeout_secs,
    )?;

    let result = deploy::run(&client, &factory, Some(secrets.private_key.as_str()), &params).await?;
    deploy::print_report(&result, &params, &gas_report);

    Ok(())
}
