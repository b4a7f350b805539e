use crate::events::{HarvestEvent, ReportedEvent};

/// Receives every event found during a harvest, in discovery order.
pub trait EventSink: Send {
    fn report(&mut self, event: &ReportedEvent);
}

/// Reports events as structured `tracing` records at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn report(&mut self, reported: &ReportedEvent) {
        match &reported.event {
            HarvestEvent::Create(e) => tracing::info!(
                signature = %reported.signature,
                slot = reported.slot,
                name = %e.name,
                symbol = %e.symbol,
                uri = %e.uri,
                mint = %e.mint,
                total_supply = %e.total_supply,
                "Found create event"
            ),
            HarvestEvent::Opaque(e) => tracing::info!(
                signature = %reported.signature,
                slot = reported.slot,
                data = %e.data,
                "Found program event"
            ),
        }
    }
}

impl EventSink for Vec<ReportedEvent> {
    fn report(&mut self, event: &ReportedEvent) {
        self.push(event.clone());
    }
}
