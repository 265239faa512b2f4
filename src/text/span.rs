//! Style spans and the interval store that holds them.
//!
//! A [`StyleSpan`] tags a half-open char range with a [`StyleKind`]. The
//! [`SpanStore`] is a flat `Vec` of spans with interval queries, coverage
//! checks, and offset maintenance as the underlying text is edited.
//!
//! Zero-length spans are never stored.

use crate::style::{QuoteStyle, StyleKind, TextAttributes};
use crate::text::TextEdit;
use std::ops::Range;

/// A style applied to a char range.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSpan {
    pub kind: StyleKind,
    /// Char range in the buffer.
    pub range: Range<usize>,
    /// Rendering metadata, present on quote spans only.
    pub quote: Option<QuoteStyle>,
}

impl StyleSpan {
    /// Create a new span.
    #[must_use]
    pub fn new(kind: StyleKind, range: Range<usize>) -> Self {
        Self {
            kind,
            range,
            quote: None,
        }
    }

    /// Create a quote span carrying its rendering metadata.
    #[must_use]
    pub fn quote(range: Range<usize>, style: QuoteStyle) -> Self {
        Self {
            kind: StyleKind::Quote,
            range,
            quote: Some(style),
        }
    }

    /// Check if this span intersects `[start, end)`.
    #[must_use]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.range.start < end && start < self.range.end
    }

    /// Check if this span contains a position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.range.contains(&pos)
    }

    /// Get the length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Same span clipped to a new range, keeping kind and metadata.
    #[must_use]
    pub fn with_range(&self, range: Range<usize>) -> Self {
        Self {
            kind: self.kind,
            range,
            quote: self.quote,
        }
    }
}

/// Interval-list registry of style spans.
#[derive(Clone, Debug, Default)]
pub struct SpanStore {
    spans: Vec<StyleSpan>,
}

impl SpanStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a span of `kind` over `[start, end)`. No-op when `start >= end`.
    pub fn add(&mut self, kind: StyleKind, start: usize, end: usize) -> bool {
        self.add_span(StyleSpan::new(kind, start..end))
    }

    /// Add a prepared span. No-op when the span is empty.
    pub fn add_span(&mut self, span: StyleSpan) -> bool {
        if span.is_empty() {
            return false;
        }
        self.spans.push(span);
        true
    }

    /// All spans in insertion order.
    #[must_use]
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Number of stored spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if no spans are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Spans of one kind.
    pub fn spans_of(&self, kind: StyleKind) -> impl Iterator<Item = &StyleSpan> {
        self.spans.iter().filter(move |span| span.kind == kind)
    }

    /// Spans of `kind` intersecting `[start, end)`.
    #[must_use]
    pub fn spans_overlapping(&self, kind: StyleKind, start: usize, end: usize) -> Vec<StyleSpan> {
        self.spans_of(kind)
            .filter(|span| span.overlaps(start, end))
            .cloned()
            .collect()
    }

    /// Remove the first span equal to `span`.
    pub fn remove(&mut self, span: &StyleSpan) -> bool {
        if let Some(idx) = self.spans.iter().position(|s| s == span) {
            self.spans.remove(idx);
            true
        } else {
            false
        }
    }

    /// Remove all spans.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Check whether `kind` covers `[start, end)`.
    ///
    /// For a non-empty range every char must be covered by the union of the
    /// kind's spans. For a caret at `p`, both `p - 1` and `p` must be covered.
    #[must_use]
    pub fn contains(&self, kind: StyleKind, start: usize, end: usize) -> bool {
        if start > end {
            return false;
        }
        if start == end {
            return start > 0 && self.covers(kind, start - 1) && self.covers(kind, start);
        }

        let mut ranges: Vec<Range<usize>> = self
            .spans_of(kind)
            .filter(|span| span.overlaps(start, end))
            .map(|span| span.range.clone())
            .collect();
        ranges.sort_by_key(|range| range.start);

        let mut covered_to = start;
        for range in ranges {
            if range.start > covered_to {
                return false;
            }
            covered_to = covered_to.max(range.end);
            if covered_to >= end {
                return true;
            }
        }
        false
    }

    /// Check whether the char at `pos` carries `kind`.
    #[must_use]
    pub fn covers(&self, kind: StyleKind, pos: usize) -> bool {
        self.spans_of(kind).any(|span| span.contains(pos))
    }

    /// Every style active on the char at `pos`.
    #[must_use]
    pub fn attributes_at(&self, pos: usize) -> TextAttributes {
        self.spans
            .iter()
            .filter(|span| span.contains(pos))
            .fold(TextAttributes::empty(), |attrs, span| {
                attrs | span.kind.attribute()
            })
    }

    /// Merge overlapping or touching spans of `kind` into single spans.
    ///
    /// Quote spans only merge when their metadata matches.
    pub fn coalesce(&mut self, kind: StyleKind) {
        let mut matching: Vec<StyleSpan> = Vec::new();
        self.spans.retain(|span| {
            if span.kind == kind {
                matching.push(span.clone());
                false
            } else {
                true
            }
        });
        matching.sort_by_key(|span| span.range.start);

        let mut merged: Vec<StyleSpan> = Vec::with_capacity(matching.len());
        for span in matching {
            match merged.last_mut() {
                Some(last) if span.range.start <= last.range.end && span.quote == last.quote => {
                    last.range.end = last.range.end.max(span.range.end);
                }
                _ => merged.push(span),
            }
        }
        self.spans.extend(merged);
    }

    /// Coalesce every kind.
    pub fn coalesce_all(&mut self) {
        for kind in StyleKind::ALL {
            self.coalesce(kind);
        }
    }

    /// Shift, grow, shrink, or drop spans after a content edit.
    ///
    /// `inserted_text` is the text that replaced the removed range; only its
    /// first and last chars matter for line-level spans.
    pub fn adjust_for_edit(&mut self, edit: &TextEdit, inserted_text: &str) {
        let removed_end = edit.offset + edit.removed;
        let leads_newline = inserted_text.starts_with('\n');
        let trails_newline = inserted_text.ends_with('\n');

        for span in &mut self.spans {
            let map_deleted = |x: usize| {
                if x <= edit.offset {
                    x
                } else if x >= removed_end {
                    x - edit.removed
                } else {
                    edit.offset
                }
            };
            let mut start = map_deleted(span.range.start);
            let mut end = map_deleted(span.range.end);

            if edit.inserted > 0 {
                let p = edit.offset;
                let n = edit.inserted;
                if span.kind.is_line_level() {
                    let shift_start = p < start || (p == start && trails_newline && start < end);
                    let grow_end = p < end || (p == end && !leads_newline);
                    if shift_start {
                        start += n;
                    }
                    if shift_start || grow_end {
                        end += n;
                    }
                } else if p <= start {
                    start += n;
                    end += n;
                } else if p < end {
                    end += n;
                }
            }

            span.range = start..end;
        }

        self.spans.retain(|span| !span.is_empty());
    }

    /// Drop or clip spans extending past `len`.
    pub fn clamp_to(&mut self, len: usize) {
        for span in &mut self.spans {
            span.range.end = span.range.end.min(len);
        }
        self.spans.retain(|span| !span.is_empty());
    }
}
