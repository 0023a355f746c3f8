//! Presentation attributes attached to a candidate.
//!
//! The attributes every renderer understands (icon, type text, tail text,
//! bold, case sensitivity, tail type) are first-class fields of [`Attrs`].
//! Contributor-specific metadata goes through typed [`ExtraKey`] tokens into a
//! residual tagged-union map, so reads are checked against the stored shape
//! instead of silently miscast.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tail::TailType;

/// Icon shown next to a candidate in the completion popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Class,
    Interface,
    Enum,
    Method,
    Field,
    Variable,
    Parameter,
    Keyword,
    Snippet,
    Module,
    File,
}

/// A value in the residual extras map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Flag(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ExtraValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ExtraValue::Flag(_) => "flag",
            ExtraValue::Int(_) => "int",
            ExtraValue::Float(_) => "float",
            ExtraValue::Text(_) => "text",
        }
    }
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        ExtraValue::Flag(value)
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        ExtraValue::Int(value)
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        ExtraValue::Float(value)
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::Text(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::Text(value.to_owned())
    }
}

/// Extracts a concrete value out of an [`ExtraValue`] variant.
///
/// Implemented for the payload types of the variants; a mismatching variant
/// yields `None`, which the typed read surfaces as [`ExtraTypeError`].
pub trait FromExtra: Sized {
    const EXPECTED: &'static str;

    fn from_extra(value: &ExtraValue) -> Option<Self>;
}

impl FromExtra for bool {
    const EXPECTED: &'static str = "flag";

    fn from_extra(value: &ExtraValue) -> Option<Self> {
        match value {
            ExtraValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromExtra for i64 {
    const EXPECTED: &'static str = "int";

    fn from_extra(value: &ExtraValue) -> Option<Self> {
        match value {
            ExtraValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromExtra for f64 {
    const EXPECTED: &'static str = "float";

    fn from_extra(value: &ExtraValue) -> Option<Self> {
        match value {
            ExtraValue::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromExtra for String {
    const EXPECTED: &'static str = "text";

    fn from_extra(value: &ExtraValue) -> Option<Self> {
        match value {
            ExtraValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// A typed token naming an entry in the extras map.
///
/// The token carries the value type, so a write/read pair through the same
/// token is type-checked at the call site even though storage holds a tagged
/// union. Tokens with the same name address the same entry regardless of
/// their declared type; a typed read over a mismatching stored variant fails
/// with [`ExtraTypeError`].
pub struct ExtraKey<V> {
    name: &'static str,
    _type: PhantomData<fn() -> V>,
}

impl<V> ExtraKey<V> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<V> Clone for ExtraKey<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ExtraKey<V> {}

impl<V> fmt::Debug for ExtraKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtraKey({})", self.name)
    }
}

/// A typed extras read found a value of a different shape under the key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("extra attribute `{key}` holds a {actual} value, expected {expected}")]
pub struct ExtraTypeError {
    pub key: &'static str,
    pub expected: &'static str,
    pub actual: &'static str,
}

/// The lazily allocated attribute block of a candidate.
///
/// A candidate that never had an attribute written carries no block at all;
/// this state is distinguishable from a block that was written and holds
/// default values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    pub(crate) bold: bool,
    pub(crate) case_insensitive: bool,
    pub(crate) small_tail_text: bool,
    pub(crate) icon: Option<Icon>,
    pub(crate) type_text: Option<String>,
    pub(crate) tail_text: Option<String>,
    pub(crate) tail_type: Option<TailType>,
    pub(crate) extras: BTreeMap<&'static str, ExtraValue>,
}

impl Attrs {
    /// Merges `src` into `self`; attributes set on `src` win on collision.
    ///
    /// An unset attribute on `src` (a `false` flag, a `None` field) never
    /// clears the corresponding attribute on `self`.
    pub(crate) fn merge_from(&mut self, src: &Attrs) {
        self.bold |= src.bold;
        self.case_insensitive |= src.case_insensitive;
        self.small_tail_text |= src.small_tail_text;
        if src.icon.is_some() {
            self.icon = src.icon;
        }
        if src.type_text.is_some() {
            self.type_text = src.type_text.clone();
        }
        if src.tail_text.is_some() {
            self.tail_text = src.tail_text.clone();
        }
        if src.tail_type.is_some() {
            self.tail_type = src.tail_type;
        }
        for (key, value) in &src.extras {
            self.extras.insert(*key, value.clone());
        }
    }
}
