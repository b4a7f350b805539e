//! # Event Scanner
//!
//! Walks the inner-instruction tree of a [`ParsedTransaction`] and turns the
//! instructions attributable to the harvested program into [`HarvestEvent`]s.
//!
//! Two strategies share the same walk and differ in which instructions they
//! select and how they decode them:
//!
//! - [`ScanStrategy::TokenMint`] selects token-program instructions nested in
//!   the transaction and reads their parsed `mintTo` fields.
//! - [`ScanStrategy::EventAuthority`] selects self-CPIs whose only account is the
//!   program's `__event_authority` PDA and exposes the payload after the
//!   8-byte discriminator as an opaque event.
//!
//! Attribution by account shape is a heuristic: any single-account inner
//! instruction that happens to name the event authority is picked up.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey, pubkey::Pubkey};

use crate::{
    error::{DecodeError, DerivationError, ScanError},
    events::{HarvestEvent, MintToInstruction, OpaqueEvent},
    transaction::{Instruction, InstructionPayload, ParsedTransaction},
};

/// The SPL Token program.
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Seed of the PDA that signs a program's self-invoked event instructions.
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

/// Length of the tag that prefixes an event instruction's payload.
pub const DISCRIMINATOR_LEN: usize = 8;

/// How events are recognized in a transaction. Chosen once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanStrategy {
    #[default]
    TokenMint,
    EventAuthority,
}

impl ScanStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TokenMint => "token-mint",
            Self::EventAuthority => "event-authority",
        }
    }

    /// Extracts the events of `program_id` from `tx`, in discovery order.
    ///
    /// An absent transaction yields no events. Instructions that fail to decode
    /// are logged and skipped; only a failed event-authority derivation aborts.
    pub fn extract_events(
        self,
        program_id: &Pubkey,
        tx: Option<&ParsedTransaction>,
    ) -> Result<Vec<HarvestEvent>, ScanError> {
        let Some(tx) = tx else {
            return Ok(Vec::new());
        };

        let events = match self {
            Self::TokenMint => scan(tx, |ix| ix.program_id == TOKEN_PROGRAM_ID, decode_mint_to),
            Self::EventAuthority => {
                let authority = derive_event_authority(program_id)?;
                scan(
                    tx,
                    |ix| matches!(ix.accounts.as_slice(), [only] if *only == authority),
                    decode_event_payload,
                )
            }
        };
        Ok(events)
    }
}

/// Derives the `__event_authority` PDA of `program_id`.
pub fn derive_event_authority(program_id: &Pubkey) -> Result<Pubkey, DerivationError> {
    Pubkey::try_find_program_address(&[EVENT_AUTHORITY_SEED], program_id)
        .map(|(address, _bump)| address)
        .ok_or_else(|| DerivationError {
            seed: String::from_utf8_lossy(EVENT_AUTHORITY_SEED).into_owned(),
            program_id: *program_id,
        })
}

fn scan<S, D>(tx: &ParsedTransaction, selects: S, decode: D) -> Vec<HarvestEvent>
where
    S: Fn(&Instruction) -> bool,
    D: Fn(&Instruction) -> Result<Option<HarvestEvent>, DecodeError>,
{
    let mut events = Vec::new();
    for group in &tx.inner_instructions {
        for (position, ix) in group.instructions.iter().enumerate() {
            if !selects(ix) {
                continue;
            }
            match decode(ix) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => tracing::debug!(
                    group = group.index,
                    position,
                    "Instruction matched but lacks mandatory event fields"
                ),
                Err(e) => tracing::warn!(
                    group = group.index,
                    position,
                    program_id = %ix.program_id,
                    error = %e,
                    "Failed to decode instruction, skipping"
                ),
            }
        }
    }
    events
}

fn decode_mint_to(ix: &Instruction) -> Result<Option<HarvestEvent>, DecodeError> {
    let InstructionPayload::Parsed(parsed) = &ix.payload else {
        return Err(DecodeError::NotParsed);
    };
    let mint_to = MintToInstruction::deserialize(parsed)?;
    Ok(mint_to.info.into_event())
}

fn decode_event_payload(ix: &Instruction) -> Result<Option<HarvestEvent>, DecodeError> {
    let InstructionPayload::Raw { data } = &ix.payload else {
        return Err(DecodeError::NotRaw);
    };
    let bytes = bs58::decode(data).into_vec()?;
    let body = bytes
        .get(DISCRIMINATOR_LEN..)
        .ok_or(DecodeError::TooShort {
            len: bytes.len(),
            expected: DISCRIMINATOR_LEN,
        })?;
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(HarvestEvent::Opaque(OpaqueEvent {
        data: BASE64.encode(body),
    })))
}
