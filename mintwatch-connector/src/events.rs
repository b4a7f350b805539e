use serde::{Deserialize, Serialize};
use solana_sdk::signature::Signature;

/// A token creation observed through a nested token-program mint.
///
/// Every field is a string; fields the active strategy cannot derive are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateEvent {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub mint: String,
    pub total_supply: String,
}

/// An event emitted by the program through its event authority, left undecoded.
///
/// `data` is the base64 encoding of the payload that follows the 8-byte discriminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpaqueEvent {
    pub data: String,
}

/// The normalized record produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HarvestEvent {
    Create(CreateEvent),
    Opaque(OpaqueEvent),
}

/// An event together with the transaction it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedEvent {
    pub signature: Signature,
    pub slot: u64,
    pub event: HarvestEvent,
}

/// The `parsed` object of a token-program `mintTo` instruction as rendered by the RPC.
///
/// Missing fields decode as empty strings; a wrong field type is a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MintToInstruction {
    #[serde(default)]
    pub info: MintToInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MintToInfo {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub mint: String,
}

impl MintToInfo {
    /// Promotes the mint to a `CreateEvent` when `mint`, `account` and `amount` are all present.
    pub fn into_event(self) -> Option<HarvestEvent> {
        if self.mint.is_empty() || self.account.is_empty() || self.amount.is_empty() {
            return None;
        }
        Some(HarvestEvent::Create(CreateEvent {
            mint: self.mint,
            total_supply: self.amount,
            ..CreateEvent::default()
        }))
    }
}
