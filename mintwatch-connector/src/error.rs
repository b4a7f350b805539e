use solana_client::client_error::ClientError;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

/// A transport or protocol failure while talking to the ledger RPC.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("RPC request failed: {0}")]
    Rpc(#[from] ClientError),

    #[error("RPC returned an invalid signature '{0}'")]
    InvalidSignature(String),

    /// Used by clients that are not backed by `solana-client`.
    #[error("{0}")]
    Transport(String),
}

/// A malformed or unexpected instruction shape found during event extraction.
///
/// Decode errors never abort a scan: the offending instruction is logged and skipped.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("parsed instruction does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("expected parsed instruction fields, found a raw payload")]
    NotParsed,

    #[error("expected a raw payload, found parsed instruction fields")]
    NotRaw,

    #[error("instruction payload is not valid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("payload is {len} bytes, shorter than the {expected}-byte discriminator")]
    TooShort { len: usize, expected: usize },
}

/// Program-derived address derivation failed for the given seeds and program.
#[derive(Error, Debug)]
#[error("no viable program address for seed {seed:?} under program {program_id}")]
pub struct DerivationError {
    pub seed: String,
    pub program_id: Pubkey,
}

/// A failure that aborts the scan of a single transaction.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

/// A page fetch failed part-way through pagination.
///
/// The signatures gathered from earlier pages are carried along in `fetched`
/// so the caller can decide whether to keep them.
#[derive(Error, Debug)]
#[error("pagination aborted after {} signatures: {source}", .fetched.len())]
pub struct PaginationError {
    #[source]
    pub source: FetchError,
    pub fetched: Vec<Signature>,
}

/// A configuration value outside the range the harvester accepts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("paginator page-size must be at least 1")]
    ZeroPageSize,
}

/// Errors that end a harvest run.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}
