//! # Ledger Client
//!
//! The read-only RPC surface the harvester needs, behind the [`LedgerClient`]
//! trait so the paginator and the harvester run against both the live
//! `RpcClient` and in-memory fakes in tests.

use async_trait::async_trait;
use serde_json::json;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_client::GetConfirmedSignaturesForAddress2Config,
    rpc_config::RpcTransactionConfig, rpc_request::RpcRequest,
};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use solana_transaction_status::{EncodedConfirmedTransactionWithStatusMeta, UiTransactionEncoding};

use crate::{error::FetchError, transaction::ParsedTransaction};

/// A trait abstracting over the ledger queries used during a harvest.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetches up to `limit` signatures that touched `address`, newest first,
    /// strictly older than `before` when it is set.
    async fn list_signatures(
        &self,
        address: &Pubkey,
        limit: usize,
        before: Option<Signature>,
    ) -> Result<Vec<Signature>, FetchError>;

    /// Fetches a transaction with its inner instructions parsed.
    ///
    /// Returns `Ok(None)` when the node has no data for the signature.
    async fn get_parsed_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<ParsedTransaction>, FetchError>;
}

#[async_trait]
impl LedgerClient for RpcClient {
    async fn list_signatures(
        &self,
        address: &Pubkey,
        limit: usize,
        before: Option<Signature>,
    ) -> Result<Vec<Signature>, FetchError> {
        let config = GetConfirmedSignaturesForAddress2Config {
            before,
            until: None,
            limit: Some(limit),
            commitment: Some(self.commitment()),
        };
        let page = self
            .get_signatures_for_address_with_config(address, config)
            .await?;

        page.into_iter()
            .map(|status| {
                status
                    .signature
                    .parse::<Signature>()
                    .map_err(|_| FetchError::InvalidSignature(status.signature))
            })
            .collect()
    }

    async fn get_parsed_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<ParsedTransaction>, FetchError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::JsonParsed),
            commitment: Some(self.commitment()),
            max_supported_transaction_version: Some(0),
        };
        // `get_transaction_with_config` treats a null result as an error; ask for an Option instead.
        let tx: Option<EncodedConfirmedTransactionWithStatusMeta> = self
            .send(
                RpcRequest::GetTransaction,
                json!([signature.to_string(), config]),
            )
            .await?;
        Ok(tx.map(ParsedTransaction::from_encoded))
    }
}
