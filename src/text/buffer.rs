//! Text buffer with a selection.
//!
//! [`TextBuffer`] owns the character sequence and the current selection. It
//! knows nothing about styles or history; every content mutation returns a
//! [`TextEdit`] describing what changed so callers can keep spans and
//! history in sync.

use crate::text::rope::RopeWrapper;
use std::ops::Range;

/// Half-open selection `[start, end)` in char offsets.
///
/// `start == end` is a caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, normalizing reversed bounds.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A caret at `offset`.
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Check if this is a caret (empty selection).
    #[must_use]
    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Selection as a range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A single content change: `removed` chars at `offset` were replaced by
/// `inserted` chars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextEdit {
    pub offset: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl TextEdit {
    /// Range of the inserted text in the new buffer.
    #[must_use]
    pub const fn inserted_range(&self) -> Range<usize> {
        self.offset..self.offset + self.inserted
    }
}

/// Character buffer plus selection.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: RopeWrapper,
    selection: Selection,
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial text and the caret at the start.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            selection: Selection::default(),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// Copy out a char range.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice_to_string(range)
    }

    /// Char ranges of each line, newline excluded.
    #[must_use]
    pub fn line_ranges(&self) -> Vec<Range<usize>> {
        self.rope.line_ranges()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, normalizing and clamping to the buffer.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len_chars();
        self.selection = Selection::new(start.min(len), end.min(len));
    }

    /// Collapse the selection to a caret.
    pub fn set_caret(&mut self, offset: usize) {
        self.selection = Selection::caret(offset.min(self.len_chars()));
    }

    /// Replace `range` with `text`.
    ///
    /// Returns `None` when nothing changed or the range starts past the end
    /// of the buffer. The end of the range is clamped. The selection is
    /// collapsed to a caret after the inserted text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Option<TextEdit> {
        let len = self.len_chars();
        if range.start > len || range.start > range.end {
            return None;
        }
        let end = range.end.min(len);
        let inserted = text.chars().count();
        if end == range.start && inserted == 0 {
            return None;
        }

        self.rope.remove(range.start..end);
        self.rope.insert(range.start, text);

        let edit = TextEdit {
            offset: range.start,
            removed: end - range.start,
            inserted,
        };
        self.selection = Selection::caret(edit.offset + inserted);
        Some(edit)
    }

    /// Insert text at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Option<TextEdit> {
        self.replace(offset..offset, text)
    }

    /// Delete a char range.
    pub fn delete(&mut self, range: Range<usize>) -> Option<TextEdit> {
        if range.start >= range.end {
            return None;
        }
        self.replace(range, "")
    }

    /// Replace the whole content with `text`, touching only the part that
    /// differs (common prefix and suffix are kept).
    pub fn set_text(&mut self, text: &str) -> Option<TextEdit> {
        let current: Vec<char> = self.rope.chars().collect();
        let target: Vec<char> = text.chars().collect();

        let prefix = current
            .iter()
            .zip(&target)
            .take_while(|(a, b)| a == b)
            .count();
        let max_suffix = current.len().min(target.len()) - prefix;
        let suffix = current
            .iter()
            .rev()
            .zip(target.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let middle: String = target[prefix..target.len() - suffix].iter().collect();
        self.replace(prefix..current.len() - suffix, &middle)
    }

    /// Convert to plain string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}
