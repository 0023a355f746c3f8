//! Tail punctuation appended after an inserted candidate.

use quill_core::EditError;
use serde::{Deserialize, Serialize};

use crate::insert::InsertionContext;

/// What punctuation or whitespace follows an inserted candidate.
///
/// `Unknown` is the sentinel returned when a candidate never had a tail
/// configured; it applies nothing, so consumers do not need to special-case
/// the unset state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailType {
    #[default]
    Unknown,
    None,
    Semicolon,
    Comma,
    Space,
    Dot,
    CaseColon,
}

impl TailType {
    /// The character this tail appends, if any.
    pub fn tail_char(self) -> Option<char> {
        match self {
            TailType::Unknown | TailType::None => None,
            TailType::Semicolon => Some(';'),
            TailType::Comma => Some(','),
            TailType::Space => Some(' '),
            TailType::Dot => Some('.'),
            TailType::CaseColon => Some(':'),
        }
    }

    /// Appends the tail at the caret and advances the caret past it.
    pub fn apply(self, ctx: &mut InsertionContext<'_>) -> Result<(), EditError> {
        match self.tail_char() {
            Some(ch) => ctx.insert_and_advance(ch.encode_utf8(&mut [0u8; 4])),
            None => Ok(()),
        }
    }
}
