#![allow(dead_code)]

use async_trait::async_trait;
use mintwatch_connector::{
    client::LedgerClient,
    error::FetchError,
    scanner::TOKEN_PROGRAM_ID,
    transaction::{InnerInstructionGroup, Instruction, InstructionPayload, ParsedTransaction},
};
use serde_json::json;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

/// A deterministic, distinct signature per `n`.
pub fn sig(n: u8) -> Signature {
    Signature::from([n; 64])
}

/// A newest-first history of `len` signatures.
pub fn history(len: u8) -> Vec<Signature> {
    (1..=len).map(sig).collect()
}

/// An in-memory ledger serving a fixed signature history and transaction set.
///
/// Pages are cut from `history` strictly after the `before` cursor, as the
/// real `getSignaturesForAddress` does.
#[derive(Default)]
pub struct FakeLedger {
    history: Vec<Signature>,
    transactions: HashMap<Signature, ParsedTransaction>,
    broken_transactions: HashSet<Signature>,
    /// Fails the page request with this zero-based call number.
    fail_page_call: Option<usize>,
    /// The `before` cursor of every page request, in order.
    pub cursors: Mutex<Vec<Option<Signature>>>,
}

impl FakeLedger {
    pub fn with_history(history: Vec<Signature>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn failing_page(mut self, call: usize) -> Self {
        self.fail_page_call = Some(call);
        self
    }

    pub fn with_transaction(mut self, signature: Signature, tx: ParsedTransaction) -> Self {
        self.transactions.insert(signature, tx);
        self
    }

    pub fn with_broken_transaction(mut self, signature: Signature) -> Self {
        self.broken_transactions.insert(signature);
        self
    }

    pub fn page_calls(&self) -> Vec<Option<Signature>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn list_signatures(
        &self,
        _address: &Pubkey,
        limit: usize,
        before: Option<Signature>,
    ) -> Result<Vec<Signature>, FetchError> {
        let call = {
            let mut cursors = self.cursors.lock().unwrap();
            cursors.push(before);
            cursors.len() - 1
        };
        if self.fail_page_call == Some(call) {
            return Err(FetchError::Transport("429 Too Many Requests".to_string()));
        }

        let start = match before {
            None => 0,
            Some(cursor) => self
                .history
                .iter()
                .position(|s| *s == cursor)
                .map_or(self.history.len(), |i| i + 1),
        };
        Ok(self.history.iter().skip(start).take(limit).copied().collect())
    }

    async fn get_parsed_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<ParsedTransaction>, FetchError> {
        if self.broken_transactions.contains(signature) {
            return Err(FetchError::Transport("connection reset".to_string()));
        }
        Ok(self.transactions.get(signature).cloned())
    }
}

/// A token-program `mintTo` as the RPC renders it with `jsonParsed`.
pub fn mint_to(mint: &str, account: &str, amount: &str) -> Instruction {
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: Vec::new(),
        payload: InstructionPayload::Parsed(json!({
            "type": "mintTo",
            "info": {
                "mint": mint,
                "account": account,
                "amount": amount,
                "mintAuthority": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            }
        })),
    }
}

/// A partially decoded instruction with a raw payload.
pub fn raw_instruction(program_id: Pubkey, accounts: Vec<Pubkey>, data: &[u8]) -> Instruction {
    Instruction {
        program_id,
        accounts,
        payload: InstructionPayload::Raw {
            data: bs58::encode(data).into_string(),
        },
    }
}

pub fn transaction(slot: u64, groups: Vec<Vec<Instruction>>) -> ParsedTransaction {
    ParsedTransaction {
        slot,
        inner_instructions: groups
            .into_iter()
            .enumerate()
            .map(|(index, instructions)| InnerInstructionGroup {
                index: index as u8,
                instructions,
            })
            .collect(),
    }
}
