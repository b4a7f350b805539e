use serde::{Deserialize, Serialize};
use solana_sdk::{commitment_config::CommitmentLevel, pubkey, pubkey::Pubkey};
use std::time::Duration;

use crate::{error::ConfigError, scanner::ScanStrategy};

/// The program harvested when no other is configured.
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("JBHnGuqyTxwbnpWiTjRqydkwSRYJFcQnwUQnLfesdRG9");

/// The top-level configuration for the `mintwatch-connector` library.
///
/// This struct aggregates the Solana endpoint, the harvested program and the
/// paginator behavior. It is typically deserialized from a configuration file
/// and passed to the `Harvester` upon initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HarvestConfig {
    #[serde(default)]
    pub solana: Solana,
    #[serde(default)]
    pub program: Program,
    #[serde(default)]
    pub paginator: PaginatorConfig,
}

/// Defines the connection settings for the Solana cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Solana {
    pub rpc_url: String,
    #[serde(with = "serde_commitment")]
    pub commitment: CommitmentLevel,
}

/// Selects the on-chain program to harvest and how its events are recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Program {
    #[serde(with = "serde_pubkey")]
    pub program_id: Pubkey,
    pub strategy: ScanStrategy,
}

/// Defines how the signature history of the program is walked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PaginatorConfig {
    /// The number of signatures requested per RPC call.
    pub page_size: usize,
    /// The pause in milliseconds after every non-empty page, to stay under provider rate limits.
    pub throttle_ms: u64,
    /// Stops pagination once this many signatures were collected. `None` means no limit.
    pub max_signatures: Option<usize>,
    /// Process the signatures fetched so far when a later page fails, instead of aborting.
    pub keep_partial_on_error: bool,
}

impl HarvestConfig {
    /// Rejects values the ledger RPC contract leaves undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paginator.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}

impl PaginatorConfig {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Default for Solana {
    fn default() -> Self {
        Self {
            rpc_url: "https://rpc.ankr.com/solana_devnet".to_string(),
            commitment: CommitmentLevel::Confirmed,
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            strategy: ScanStrategy::default(),
        }
    }
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            throttle_ms: 400,
            max_signatures: None,
            keep_partial_on_error: false,
        }
    }
}

mod serde_commitment {

    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(c: &CommitmentLevel, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match c {
            CommitmentLevel::Processed => "processed",
            CommitmentLevel::Confirmed => "confirmed",
            CommitmentLevel::Finalized => "finalized",
        };
        serializer.serialize_str(s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<CommitmentLevel, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let level = match s.to_lowercase().as_str() {
            "processed" => CommitmentLevel::Processed,
            "finalized" => CommitmentLevel::Finalized,
            _ => CommitmentLevel::Confirmed,
        };
        Ok(level)
    }
}

/// Program ids are written as base58 strings rather than byte arrays.
mod serde_pubkey {

    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| D::Error::custom(format!("invalid program id '{s}': {e}")))
    }
}
