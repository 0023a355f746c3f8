//! The candidate model for Quill's code-completion engine.
//!
//! A [`Candidate`] is one completion suggestion: a semantic payload, one or
//! more equivalent lookup strings, a `(grouping, priority)` ranking key,
//! presentation attributes, and the capability hooks that decide what happens
//! when the suggestion is accepted.
//!
//! Candidates are configured by the contributor that creates them, then handed
//! off to the ranking and presentation layers as read-mostly values. How
//! candidates are discovered (language contributors, the semantic index) and
//! where the accepted text ultimately lands (the editor) live elsewhere; this
//! crate only models the suggestion itself.

pub mod attr;
pub mod candidate;
pub mod insert;
pub mod policy;
pub mod rank;
pub mod tail;

pub use attr::{ExtraKey, ExtraTypeError, ExtraValue, FromExtra, Icon};
pub use candidate::{Candidate, HasPriority};
pub use insert::{
    commit, commits_on, CompletionCharHandler, DefaultCompletionCharHandler, InsertHandler,
    InsertionContext,
};
pub use policy::AutoCompletionPolicy;
pub use rank::{rank_candidates, sort_by_text, RankKey};
pub use tail::TailType;
