//! Offset-based text edits
//!
//! Edits address byte offsets into the original text and are applied
//! right-to-left, so every offset stays valid and nothing outside an edited
//! span is touched. The syntax tree is never re-printed.

use crate::error::EditError;
use std::ops::Range;

/// Replace `range` of the original text with `replacement`
///
/// An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl SourceEdit {
    /// Insert `text` at `offset`
    #[inline]
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range: offset..offset,
            replacement: text.into(),
        }
    }

    /// Replace `range` with `text`
    #[inline]
    #[must_use]
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }
}

/// Non-overlapping edits against one text
///
/// Insertions at the same offset keep the order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    edits: Vec<SourceEdit>,
}

impl EditSet {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: SourceEdit) {
        self.edits.push(edit);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply every edit to `text`
    ///
    /// # Errors
    /// - `EditError::OutOfBounds` if an edit reaches past the text
    /// - `EditError::NotCharBoundary` if an offset splits a UTF-8 sequence
    /// - `EditError::Overlap` if two edits share bytes
    pub fn apply(&self, text: &str) -> Result<String, EditError> {
        let mut ordered: Vec<&SourceEdit> = self.edits.iter().collect();
        ordered.sort_by_key(|e| (e.range.start, e.range.end));

        let mut previous: Option<&Range<usize>> = None;
        for edit in &ordered {
            let range = &edit.range;
            if range.start > range.end || range.end > text.len() {
                return Err(EditError::OutOfBounds {
                    range: range.clone(),
                    len: text.len(),
                });
            }
            for offset in [range.start, range.end] {
                if !text.is_char_boundary(offset) {
                    return Err(EditError::NotCharBoundary(offset));
                }
            }
            if let Some(prev) = previous {
                if range.start < prev.end {
                    return Err(EditError::Overlap {
                        first: prev.clone(),
                        second: range.clone(),
                    });
                }
            }
            previous = Some(range);
        }

        let mut out = text.to_string();
        for edit in ordered.iter().rev() {
            out.replace_range(edit.range.clone(), &edit.replacement);
        }
        Ok(out)
    }
}

/// Apply a single edit
///
/// # Errors
/// See [`EditSet::apply`].
pub fn splice(text: &str, edit: SourceEdit) -> Result<String, EditError> {
    let mut set = EditSet::new();
    set.push(edit);
    set.apply(text)
}
