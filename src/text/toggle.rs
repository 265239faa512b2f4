//! Applying and removing styles over a range.
//!
//! Apply adds a span (optionally coalescing it with touching spans of the
//! same kind). Remove carves the range out of every intersecting span,
//! re-adding the flanks that fall outside it.

use crate::style::StyleKind;
use crate::text::span::{SpanStore, StyleSpan};
use std::ops::Range;

/// Applies and removes styles on a [`SpanStore`].
#[derive(Clone, Copy, Debug)]
pub struct StyleToggleEngine {
    coalesce_on_apply: bool,
}

impl Default for StyleToggleEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StyleToggleEngine {
    /// Create an engine. With `coalesce_on_apply` off, apply may leave
    /// overlapping spans of the same kind.
    #[must_use]
    pub const fn new(coalesce_on_apply: bool) -> Self {
        Self { coalesce_on_apply }
    }

    /// Apply (`engage`) or carve out (`!engage`) `kind` over `[start, end)`.
    ///
    /// No-op when `start >= end`.
    pub fn toggle(&self, store: &mut SpanStore, kind: StyleKind, start: usize, end: usize, engage: bool) {
        if start >= end {
            return;
        }
        if engage {
            self.apply_span(store, StyleSpan::new(kind, start..end));
        } else {
            Self::carve(store, kind, start..end);
        }
    }

    /// Apply a prepared span (used for quotes, which carry metadata).
    pub fn apply_span(&self, store: &mut SpanStore, span: StyleSpan) {
        let kind = span.kind;
        if store.add_span(span) && self.coalesce_on_apply {
            store.coalesce(kind);
        }
    }

    /// Remove `kind` from `range`, keeping the parts of each span outside it.
    pub fn carve(store: &mut SpanStore, kind: StyleKind, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        for span in store.spans_overlapping(kind, range.start, range.end) {
            store.remove(&span);
            if span.range.start < range.start {
                store.add_span(span.with_range(span.range.start..range.start));
            }
            if span.range.end > range.end {
                store.add_span(span.with_range(range.end..span.range.end));
            }
        }
    }
}
