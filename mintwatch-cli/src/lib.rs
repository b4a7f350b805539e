pub mod cli;
pub mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RunCmd};
use config::{load_config, HarvesterConfig};
use mintwatch_connector::{sink::TracingSink, workers::Harvester};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use std::sync::Arc;

/// The main entry point for running the harvester.
/// This function handles CLI parsing, configuration and logging setup, then runs one harvest.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Commands::Run(run_cmd) = cli.command;
    let config = load_config_from_cli(run_cmd)?;
    mintwatch_logger::logging::init(&config.log)?;
    tracing::info!("Configuration loaded: {:#?}", &config);
    harvest(config).await
}

/// Loads the configuration file named on the command line and applies the flag overrides.
pub fn load_config_from_cli(run_cmd: RunCmd) -> Result<HarvesterConfig> {
    let mut config = load_config(run_cmd.config.as_deref())?;

    if let Some(program_id) = run_cmd.program_id {
        config.connector.program.program_id = program_id
            .parse()
            .with_context(|| format!("Invalid program id '{program_id}'"))?;
    }
    if let Some(rpc_url) = run_cmd.rpc_url {
        config.connector.solana.rpc_url = rpc_url;
    }

    Ok(config)
}

async fn harvest(config: HarvesterConfig) -> Result<()> {
    let connector = Arc::new(config.connector);
    let rpc_client = Arc::new(RpcClient::new_with_commitment(
        connector.solana.rpc_url.clone(),
        CommitmentConfig {
            commitment: connector.solana.commitment,
        },
    ));

    let mut harvester = Harvester::new(rpc_client, connector, TracingSink);
    let summary = harvester.run().await.context("Harvest aborted")?;
    tracing::info!(
        signatures = summary.signatures,
        events = summary.events.len(),
        "Done"
    );
    Ok(())
}
