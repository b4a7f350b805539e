use clap::{Args, Parser, Subcommand};

/// Harvests token-creation events of a Solana program from its transaction history.
#[derive(Debug, Parser)]
#[command(name = "mintwatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk the program's signature history and report the events found.
    Run(RunCmd),
}

#[derive(Debug, Args)]
pub struct RunCmd {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base58 id of the program to harvest. Overrides the configuration file.
    #[arg(long)]
    pub program_id: Option<String>,

    /// JSON-RPC endpoint of the cluster. Overrides the configuration file.
    #[arg(long)]
    pub rpc_url: Option<String>,
}
