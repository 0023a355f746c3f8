//! Core text primitives shared by the Quill crates.
//!
//! This crate is intentionally small: byte-offset sizes and ranges (re-exported
//! from `text-size`) and a checked single-edit application into a string
//! buffer. Anything richer (documents, multi-edit transactions, LSP position
//! mapping) lives in the layers that need it.

pub mod edit;

pub use edit::{apply_edit, EditError, TextEdit};
pub use text_size::{TextRange, TextSize};
