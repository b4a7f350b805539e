//! A Rust library for harvesting the on-chain activity of a single Solana program.
//!
//! It pages backward through the program's signature history, fetches each
//! transaction with parsed inner instructions and extracts the events the
//! program produced.
//!
//! # Key Components
//!
//! *   [`client::LedgerClient`]: The read-only RPC surface, implemented for the nonblocking `RpcClient`.
//! *   [`workers::SignaturePaginator`]: Walks the signature history newest-to-oldest with a throttle.
//! *   [`scanner::ScanStrategy`]: Selects and decodes event instructions from a transaction.
//! *   [`workers::Harvester`]: Drives a full run and reports events to an [`sink::EventSink`].
pub mod client;
/// Defines configuration structures for the connector.
pub mod config;
/// Error types for fetching, decoding and derivation.
pub mod error;
/// Normalized event records.
pub mod events;
/// Event extraction from parsed transactions.
pub mod scanner;
/// Reporting sinks for found events.
pub mod sink;
/// The read-only transaction model the scanner walks.
pub mod transaction;
/// Pagination and the harvest driver.
pub mod workers;
