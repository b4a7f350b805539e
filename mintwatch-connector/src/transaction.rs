//! # Parsed Transaction Model
//!
//! A read-only view of the parts of a confirmed transaction the scanner walks:
//! the inner-instruction groups and, for each instruction, its program, its
//! accounts and either the RPC-parsed fields or the raw base58 payload.
//!
//! [`ParsedTransaction::from_encoded`] builds this view from a `jsonParsed`
//! `getTransaction` response. Instructions that cannot be resolved (unknown
//! account index, malformed public key) are logged and dropped.

use solana_sdk::pubkey::Pubkey;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, UiInnerInstructions,
    UiInstruction, UiLoadedAddresses, UiMessage, UiParsedInstruction,
};

/// The payload of a single instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionPayload {
    /// Structured fields produced by the RPC node's instruction parser.
    Parsed(serde_json::Value),
    /// The opaque instruction data, base58-encoded as returned by the RPC.
    Raw { data: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<Pubkey>,
    pub payload: InstructionPayload,
}

/// Instructions invoked from the top-level instruction at `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerInstructionGroup {
    pub index: u8,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTransaction {
    pub slot: u64,
    pub inner_instructions: Vec<InnerInstructionGroup>,
}

impl ParsedTransaction {
    /// Builds the scanner's view of a transaction fetched with `jsonParsed` encoding.
    pub fn from_encoded(tx: EncodedConfirmedTransactionWithStatusMeta) -> Self {
        let slot = tx.slot;
        let Some(meta) = tx.transaction.meta else {
            return Self {
                slot,
                inner_instructions: Vec::new(),
            };
        };

        let loaded = Option::<UiLoadedAddresses>::from(meta.loaded_addresses);
        let account_keys = message_account_keys(&tx.transaction.transaction, loaded.as_ref());
        let groups = Option::<Vec<UiInnerInstructions>>::from(meta.inner_instructions)
            .unwrap_or_default();

        Self {
            slot,
            inner_instructions: convert_inner_instructions(groups, &account_keys),
        }
    }
}

/// Converts RPC inner-instruction groups, resolving compiled account indices against `account_keys`.
pub fn convert_inner_instructions(
    groups: Vec<UiInnerInstructions>,
    account_keys: &[Pubkey],
) -> Vec<InnerInstructionGroup> {
    groups
        .into_iter()
        .map(|group| InnerInstructionGroup {
            index: group.index,
            instructions: group
                .instructions
                .into_iter()
                .enumerate()
                .filter_map(|(position, ix)| {
                    let converted = convert_instruction(ix, account_keys);
                    if converted.is_none() {
                        tracing::warn!(
                            group = group.index,
                            position,
                            "Dropping inner instruction with unresolvable program or accounts"
                        );
                    }
                    converted
                })
                .collect(),
        })
        .collect()
}

fn convert_instruction(ix: UiInstruction, account_keys: &[Pubkey]) -> Option<Instruction> {
    match ix {
        UiInstruction::Parsed(UiParsedInstruction::Parsed(parsed)) => Some(Instruction {
            program_id: parsed.program_id.parse().ok()?,
            accounts: Vec::new(),
            payload: InstructionPayload::Parsed(parsed.parsed),
        }),
        UiInstruction::Parsed(UiParsedInstruction::PartiallyDecoded(decoded)) => {
            let accounts = decoded
                .accounts
                .iter()
                .map(|a| a.parse().ok())
                .collect::<Option<Vec<Pubkey>>>()?;
            Some(Instruction {
                program_id: decoded.program_id.parse().ok()?,
                accounts,
                payload: InstructionPayload::Raw { data: decoded.data },
            })
        }
        UiInstruction::Compiled(compiled) => {
            let program_id = *account_keys.get(compiled.program_id_index as usize)?;
            let accounts = compiled
                .accounts
                .iter()
                .map(|&i| account_keys.get(i as usize).copied())
                .collect::<Option<Vec<Pubkey>>>()?;
            Some(Instruction {
                program_id,
                accounts,
                payload: InstructionPayload::Raw { data: compiled.data },
            })
        }
    }
}

/// The full account key list compiled instructions index into.
///
/// Parsed messages already list loaded addresses; raw messages need the
/// writable and then readonly lookup-table addresses appended.
fn message_account_keys(tx: &EncodedTransaction, loaded: Option<&UiLoadedAddresses>) -> Vec<Pubkey> {
    let EncodedTransaction::Json(ui_tx) = tx else {
        return Vec::new();
    };
    let keys: Option<Vec<Pubkey>> = match &ui_tx.message {
        UiMessage::Parsed(message) => message
            .account_keys
            .iter()
            .map(|account| account.pubkey.parse().ok())
            .collect(),
        UiMessage::Raw(message) => {
            let lookups = loaded
                .map(|l| l.writable.iter().chain(l.readonly.iter()))
                .into_iter()
                .flatten();
            message
                .account_keys
                .iter()
                .chain(lookups)
                .map(|key| key.parse().ok())
                .collect()
        }
    };
    // A bad key shifts every later index.
    keys.unwrap_or_else(|| {
        tracing::warn!("Message has a malformed account key; compiled instructions are unresolvable");
        Vec::new()
    })
}

impl From<EncodedConfirmedTransactionWithStatusMeta> for ParsedTransaction {
    fn from(tx: EncodedConfirmedTransactionWithStatusMeta) -> Self {
        Self::from_encoded(tx)
    }
}
