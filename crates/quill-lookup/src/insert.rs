//! The insertion layer: what happens when a candidate is accepted.
//!
//! The real editor/document lives outside this crate; the insertion protocol
//! only needs a text buffer, a caret, and the character that triggered the
//! commit (if any).

use quill_core::{apply_edit, EditError, TextEdit, TextSize};

use crate::candidate::Candidate;
use crate::tail::TailType;

/// Mutable view of the document an accepted candidate is written into.
pub struct InsertionContext<'a> {
    text: &'a mut String,
    caret: TextSize,
    completion_char: Option<char>,
}

impl<'a> InsertionContext<'a> {
    pub fn new(text: &'a mut String, caret: TextSize) -> Self {
        Self {
            text,
            caret,
            completion_char: None,
        }
    }

    /// Records the character that triggered the commit, e.g. a typed `;`.
    pub fn with_completion_char(mut self, ch: char) -> Self {
        self.completion_char = Some(ch);
        self
    }

    pub fn text(&self) -> &str {
        self.text
    }

    pub fn caret(&self) -> TextSize {
        self.caret
    }

    pub fn completion_char(&self) -> Option<char> {
        self.completion_char
    }

    /// Inserts `insert` at the caret and moves the caret past it.
    pub fn insert_and_advance(&mut self, insert: &str) -> Result<(), EditError> {
        apply_edit(self.text, &TextEdit::insert(self.caret, insert))?;
        self.caret += TextSize::of(insert);
        Ok(())
    }
}

/// How accepting a candidate mutates the document.
///
/// A candidate without a handler gets the default behavior: its primary text
/// is inserted verbatim at the caret.
pub trait InsertHandler<T>: Send + Sync {
    fn handle_insert(
        &self,
        ctx: &mut InsertionContext<'_>,
        item: &Candidate<T>,
    ) -> Result<(), EditError>;
}

/// Decides, per typed character, whether that character commits the candidate
/// and which tail to apply when it does.
pub trait CompletionCharHandler<T>: Send + Sync {
    /// `Some(tail)` commits the candidate and appends that tail; `None` lets
    /// the character be typed through without accepting the candidate.
    fn tail_for(&self, ch: char, item: &Candidate<T>) -> Option<TailType>;
}

/// Commit-character mapping installed on every candidate at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompletionCharHandler;

impl<T> CompletionCharHandler<T> for DefaultCompletionCharHandler {
    fn tail_for(&self, ch: char, _item: &Candidate<T>) -> Option<TailType> {
        match ch {
            ';' => Some(TailType::Semicolon),
            ',' => Some(TailType::Comma),
            ' ' => Some(TailType::Space),
            '.' => Some(TailType::Dot),
            _ => None,
        }
    }
}

/// True when typing `ch` should immediately accept `item`.
pub fn commits_on<T>(item: &Candidate<T>, ch: char) -> bool {
    item.completion_char_handler().tail_for(ch, item).is_some()
}

/// Writes an accepted candidate into the document.
///
/// Applies the candidate's insert handler (verbatim primary text when none is
/// set), then the tail chosen by the completion character, falling back to
/// the candidate's configured tail type when no character committed it or the
/// character maps to no tail.
pub fn commit<T>(item: &Candidate<T>, ctx: &mut InsertionContext<'_>) -> Result<(), EditError> {
    tracing::trace!(text = item.primary_text(), "committing completion candidate");
    match item.insert_handler() {
        Some(handler) => handler.handle_insert(ctx, item)?,
        None => ctx.insert_and_advance(item.primary_text())?,
    }
    let tail = ctx
        .completion_char()
        .and_then(|ch| item.completion_char_handler().tail_for(ch, item))
        .unwrap_or_else(|| item.tail_type());
    tail.apply(ctx)
}
