//! # Harvester
//!
//! This module defines the [`Harvester`], which drives one harvest run:
//!
//! 1. The [`SignaturePaginator`] walks the full signature history of the
//!    configured program, newest first.
//! 2. Each transaction is then fetched and scanned one at a time, in signature
//!    order, with the configured [`ScanStrategy`](crate::scanner::ScanStrategy).
//! 3. Every event found is handed to the [`EventSink`] and kept in the
//!    returned [`HarvestSummary`].
//!
//! A failed page aborts the run unless `keep-partial-on-error` is set. A failed
//! transaction fetch or scan is logged and that signature is skipped.

mod paginator;

pub use paginator::SignaturePaginator;

use solana_sdk::signature::Signature;
use std::sync::Arc;

use crate::{
    client::LedgerClient,
    config::HarvestConfig,
    error::HarvestError,
    events::ReportedEvent,
    sink::EventSink,
};

/// The outcome of a completed harvest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Number of signatures returned by pagination.
    pub signatures: usize,
    /// Transactions fetched (or found absent) and scanned.
    pub transactions_scanned: usize,
    /// Transactions skipped because the fetch or the scan failed.
    pub transactions_failed: usize,
    /// Every event found, in discovery order.
    pub events: Vec<ReportedEvent>,
}

pub struct Harvester<C: LedgerClient + ?Sized, K: EventSink> {
    client: Arc<C>,
    config: Arc<HarvestConfig>,
    paginator: SignaturePaginator<C>,
    sink: K,
}

impl<C: LedgerClient + ?Sized, K: EventSink> Harvester<C, K> {
    /// Creates a new `Harvester`.
    ///
    /// # Arguments
    ///
    /// * `client` - A shared ledger client (e.g., `Arc<RpcClient>`).
    /// * `config` - The shared harvest configuration.
    /// * `sink` - Where found events are reported.
    pub fn new(client: Arc<C>, config: Arc<HarvestConfig>, sink: K) -> Self {
        let paginator = SignaturePaginator::new(client.clone(), config.paginator.clone());
        Self {
            client,
            config,
            paginator,
            sink,
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Runs pagination to completion, then scans every transaction in order.
    pub async fn run(&mut self) -> Result<HarvestSummary, HarvestError> {
        let program_id = self.config.program.program_id;
        tracing::info!(
            %program_id,
            strategy = self.config.program.strategy.as_str(),
            "Starting harvest"
        );

        let signatures = match self.paginator.paginate(&program_id).await {
            Ok(signatures) => signatures,
            Err(e) if self.config.paginator.keep_partial_on_error => {
                tracing::error!(
                    %program_id,
                    error = %e.source,
                    kept = e.fetched.len(),
                    "Failed to fetch signatures, continuing with the pages fetched so far"
                );
                e.fetched
            }
            Err(e) => {
                tracing::error!(%program_id, error = %e, "Failed to fetch signatures for program");
                return Err(e.into());
            }
        };

        tracing::info!(count = signatures.len(), "Processing signatures");
        let mut summary = HarvestSummary {
            signatures: signatures.len(),
            ..HarvestSummary::default()
        };
        for signature in &signatures {
            self.process_one_transaction(signature, &mut summary).await;
        }

        tracing::info!(
            scanned = summary.transactions_scanned,
            failed = summary.transactions_failed,
            events = summary.events.len(),
            "Harvest complete"
        );
        Ok(summary)
    }

    async fn process_one_transaction(&mut self, signature: &Signature, summary: &mut HarvestSummary) {
        let program_id = self.config.program.program_id;
        let strategy = self.config.program.strategy;

        let tx = match self.client.get_parsed_transaction(signature).await {
            Ok(tx) => tx,
            Err(e) => {
                tracing::error!(%signature, error = %e, "Failed to fetch parsed transaction");
                summary.transactions_failed += 1;
                return;
            }
        };
        if tx.is_none() {
            tracing::debug!(%signature, "Transaction not available from the node");
        }

        let events = match strategy.extract_events(&program_id, tx.as_ref()) {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(%signature, error = %e, "Failed to scan transaction events");
                summary.transactions_failed += 1;
                return;
            }
        };
        summary.transactions_scanned += 1;

        let slot = tx.map_or(0, |tx| tx.slot);
        for event in events {
            let reported = ReportedEvent {
                signature: *signature,
                slot,
                event,
            };
            self.sink.report(&reported);
            summary.events.push(reported);
        }
    }
}
