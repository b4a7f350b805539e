use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::sync::Arc;
use tokio::time::sleep;

use crate::{client::LedgerClient, config::PaginatorConfig, error::PaginationError};

/// Walks the signature history of an address from newest to oldest.
pub struct SignaturePaginator<C: LedgerClient + ?Sized> {
    client: Arc<C>,
    config: PaginatorConfig,
}

impl<C: LedgerClient + ?Sized> SignaturePaginator<C> {
    pub fn new(client: Arc<C>, config: PaginatorConfig) -> Self {
        Self { client, config }
    }

    /// Collects every signature that touched `address`, newest first.
    ///
    /// Each page is requested strictly before the oldest signature of the
    /// previous one, and an empty page ends the walk. The configured throttle
    /// is slept after every non-empty page. A failed page aborts the walk; the
    /// signatures gathered until then are returned inside the error.
    pub async fn paginate(&self, address: &Pubkey) -> Result<Vec<Signature>, PaginationError> {
        let mut before: Option<Signature> = None;
        let mut signatures = Vec::new();

        if self.config.max_signatures == Some(0) {
            tracing::info!(%address, "max-signatures is 0, skipping pagination");
            return Ok(signatures);
        }

        loop {
            let page = match self
                .client
                .list_signatures(address, self.config.page_size, before)
                .await
            {
                Ok(page) => page,
                Err(source) => {
                    return Err(PaginationError {
                        source,
                        fetched: signatures,
                    })
                }
            };

            let Some(oldest) = page.last().copied() else {
                tracing::info!(%address, total = signatures.len(), "Signature history exhausted");
                break;
            };

            tracing::debug!(%address, page_len = page.len(), %oldest, "Fetched signature page");
            signatures.extend(page);
            before = Some(oldest);

            if let Some(max) = self.config.max_signatures {
                if signatures.len() >= max {
                    signatures.truncate(max);
                    tracing::info!(%address, max, "Reached max-signatures, stopping pagination");
                    break;
                }
            }

            sleep(self.config.throttle()).await;
        }

        Ok(signatures)
    }
}
