//! Text edit primitives and checked application.

use crate::{TextRange, TextSize};
use std::fmt;

/// A single range replacement in a text buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::new(offset, offset), text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, "")
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EditError {
    RangeOutOfBounds {
        range: TextRange,
        text_len: TextSize,
    },
    InvalidUtf8Boundary {
        offset: TextSize,
    },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::RangeOutOfBounds { range, text_len } => write!(
                f,
                "edit range {range:?} is out of bounds for text length {text_len:?}"
            ),
            EditError::InvalidUtf8Boundary { offset } => {
                write!(f, "edit offset {offset:?} is not a UTF-8 character boundary")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Applies a single edit to `text` in place.
///
/// The edit range must lie within the buffer and both endpoints must fall on
/// UTF-8 character boundaries.
pub fn apply_edit(text: &mut String, edit: &TextEdit) -> Result<(), EditError> {
    let text_len = TextSize::of(text.as_str());
    if edit.range.end() > text_len {
        return Err(EditError::RangeOutOfBounds {
            range: edit.range,
            text_len,
        });
    }
    let start = usize::from(edit.range.start());
    let end = usize::from(edit.range.end());
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(EditError::InvalidUtf8Boundary {
                offset: TextSize::new(offset as u32),
            });
        }
    }
    text.replace_range(start..end, &edit.replacement);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_into_middle() {
        let mut text = String::from("ab");
        apply_edit(&mut text, &TextEdit::insert(TextSize::new(1), "x")).unwrap();
        assert_eq!(text, "axb");
    }

    #[test]
    fn replace_range() {
        let mut text = String::from("hello world");
        let edit = TextEdit::new(TextRange::new(TextSize::new(0), TextSize::new(5)), "goodbye");
        apply_edit(&mut text, &edit).unwrap();
        assert_eq!(text, "goodbye world");
    }

    #[test]
    fn delete_range() {
        let mut text = String::from("hello world");
        let edit = TextEdit::delete(TextRange::new(TextSize::new(5), TextSize::new(11)));
        apply_edit(&mut text, &edit).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut text = String::from("ab");
        let err = apply_edit(&mut text, &TextEdit::insert(TextSize::new(3), "x")).unwrap_err();
        assert_eq!(
            err,
            EditError::RangeOutOfBounds {
                range: TextRange::new(TextSize::new(3), TextSize::new(3)),
                text_len: TextSize::new(2),
            }
        );
        assert_eq!(text, "ab");
    }

    #[test]
    fn non_boundary_offset_is_rejected() {
        let mut text = String::from("é");
        let err = apply_edit(&mut text, &TextEdit::insert(TextSize::new(1), "x")).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidUtf8Boundary {
                offset: TextSize::new(1)
            }
        );
        assert_eq!(text, "é");
    }
}
