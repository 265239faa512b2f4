//! Rope wrapper using the ropey crate.

use ropey::Rope;
use std::ops::Range;

/// Wrapper around `ropey::Rope` addressed purely by char offsets.
///
/// Line splitting here only honors `\n`; ropey's own line API also breaks
/// on `\r`, `\u{2028}` and friends, which the formatting engine must not.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create an empty rope.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
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
        self.rope.len_chars() == 0
    }

    /// Copy out a char range, clamped to the rope.
    #[must_use]
    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.rope.slice(start..end).to_string()
    }

    /// Insert text at a character position.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if char_idx <= self.len_chars() {
            self.rope.insert(char_idx, text);
        }
    }

    /// Remove a range of characters, clamped to the rope.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Iterate characters.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// Char ranges of each `\n`-delimited line, newline excluded.
    ///
    /// Always yields at least one (possibly empty) line.
    #[must_use]
    pub fn line_ranges(&self) -> Vec<Range<usize>> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (idx, ch) in self.rope.chars().enumerate() {
            if ch == '\n' {
                lines.push(start..idx);
                start = idx + 1;
            }
        }
        lines.push(start..self.len_chars());
        lines
    }
}
