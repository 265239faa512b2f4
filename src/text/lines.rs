//! Per-line structural styles: bullets, quotes, and alignment.
//!
//! Lines are never stored. Every operation recomputes them from the
//! buffer's `\n` positions, so line spans are anchored to whatever the
//! lines look like at the time of the call.
//!
//! A line is *affected* by a selection when the selection lies entirely
//! inside the line, or the line lies entirely inside the selection. A line
//! straddling just one selection boundary is left alone.

use crate::style::{QuoteStyle, StyleKind};
use crate::text::buffer::{Selection, TextBuffer};
use crate::text::span::{SpanStore, StyleSpan};
use crate::text::toggle::StyleToggleEngine;
use std::ops::Range;

/// One `\n`-delimited line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// 0-based position among the lines.
    pub index: usize,
    /// Char range, newline excluded.
    pub range: Range<usize>,
}

impl Line {
    /// Check if the line has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Apply the inclusion rule against `[sel_start, sel_end)`.
    #[must_use]
    pub fn is_affected_by(&self, sel_start: usize, sel_end: usize) -> bool {
        let (start, end) = (self.range.start, self.range.end);
        (start <= sel_start && sel_end <= end) || (sel_start <= start && end <= sel_end)
    }
}

/// Split the buffer into lines.
#[must_use]
pub fn lines(buffer: &TextBuffer) -> Vec<Line> {
    buffer
        .line_ranges()
        .into_iter()
        .enumerate()
        .map(|(index, range)| Line { index, range })
        .collect()
}

/// Lines affected by a selection, in order.
#[must_use]
pub fn affected_lines(buffer: &TextBuffer, selection: Selection) -> Vec<Line> {
    lines(buffer)
        .into_iter()
        .filter(|line| line.is_affected_by(selection.start, selection.end))
        .collect()
}

/// Applies line-level styles.
#[derive(Clone, Copy, Debug)]
pub struct LineStyleEngine {
    quote: QuoteStyle,
}

impl Default for LineStyleEngine {
    fn default() -> Self {
        Self::new(QuoteStyle::default())
    }
}

impl LineStyleEngine {
    /// Create an engine stamping `quote` on new quote spans.
    #[must_use]
    pub const fn new(quote: QuoteStyle) -> Self {
        Self { quote }
    }

    /// Check whether every affected, non-empty line is fully covered by `kind`.
    ///
    /// Returns `None` when no non-empty line is affected.
    #[must_use]
    pub fn all_styled(
        buffer: &TextBuffer,
        store: &SpanStore,
        kind: StyleKind,
        selection: Selection,
    ) -> Option<bool> {
        let targets: Vec<Line> = affected_lines(buffer, selection)
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();
        if targets.is_empty() {
            return None;
        }
        Some(
            targets
                .iter()
                .all(|line| store.contains(kind, line.range.start, line.range.end)),
        )
    }

    /// Bullet (`engage`) or un-bullet the lines affected by the selection.
    ///
    /// Returns true if any span changed.
    pub fn set_bullet(
        &self,
        buffer: &TextBuffer,
        store: &mut SpanStore,
        selection: Selection,
        engage: bool,
    ) -> bool {
        let changed = Self::changed_lines(buffer, store, StyleKind::Bullet, selection, engage);
        for line in &changed {
            StyleToggleEngine::carve(store, StyleKind::Bullet, line.range.clone());
            if engage {
                store.add(StyleKind::Bullet, line.range.start, line.range.end);
            }
        }
        !changed.is_empty()
    }

    /// Quote or un-quote the lines affected by the selection.
    ///
    /// Quoting also italicizes and highlights each line. Un-quoting removes
    /// only the quote itself.
    pub fn set_quote(
        &self,
        buffer: &TextBuffer,
        store: &mut SpanStore,
        toggler: &StyleToggleEngine,
        selection: Selection,
        engage: bool,
    ) -> bool {
        let quote = self.quote;
        let changed = Self::changed_lines(buffer, store, StyleKind::Quote, selection, engage);
        for line in &changed {
            let range = line.range.clone();
            if engage {
                StyleToggleEngine::carve(store, StyleKind::Quote, range.clone());
                store.add_span(StyleSpan::quote(range.clone(), quote));
                toggler.toggle(store, StyleKind::Italic, range.start, range.end, true);
                toggler.toggle(store, StyleKind::Highlight, range.start, range.end, true);
            } else {
                StyleToggleEngine::carve(store, StyleKind::Quote, range);
            }
        }
        !changed.is_empty()
    }

    /// Re-assert left alignment over the resolved range.
    pub fn align_left(
        &self,
        buffer: &TextBuffer,
        store: &mut SpanStore,
        toggler: &StyleToggleEngine,
        selection: Selection,
    ) -> bool {
        let Some(range) = Self::resolve_range(buffer, selection) else {
            return false;
        };
        Self::assert_alignment(store, toggler, StyleKind::AlignLeft, range);
        true
    }

    /// Toggle right alignment over the resolved range.
    pub fn align_right(
        &self,
        buffer: &TextBuffer,
        store: &mut SpanStore,
        toggler: &StyleToggleEngine,
        selection: Selection,
    ) -> bool {
        Self::toggle_alignment(buffer, store, toggler, StyleKind::AlignRight, selection)
    }

    /// Toggle center alignment over the resolved range.
    pub fn align_center(
        &self,
        buffer: &TextBuffer,
        store: &mut SpanStore,
        toggler: &StyleToggleEngine,
        selection: Selection,
    ) -> bool {
        Self::toggle_alignment(buffer, store, toggler, StyleKind::AlignCenter, selection)
    }

    /// The selection itself, or for a caret the first line enclosing it.
    ///
    /// `None` when the result would be empty.
    #[must_use]
    pub fn resolve_range(buffer: &TextBuffer, selection: Selection) -> Option<Range<usize>> {
        let range = if selection.is_caret() {
            affected_lines(buffer, selection).into_iter().next()?.range
        } else {
            selection.range()
        };
        (!range.is_empty()).then_some(range)
    }

    fn toggle_alignment(
        buffer: &TextBuffer,
        store: &mut SpanStore,
        toggler: &StyleToggleEngine,
        kind: StyleKind,
        selection: Selection,
    ) -> bool {
        let Some(range) = Self::resolve_range(buffer, selection) else {
            return false;
        };
        if store.contains(kind, range.start, range.end) {
            Self::assert_alignment(store, toggler, StyleKind::AlignLeft, range);
        } else {
            Self::assert_alignment(store, toggler, kind, range);
        }
        true
    }

    /// Clear every alignment over `range`, then apply `kind`.
    fn assert_alignment(
        store: &mut SpanStore,
        toggler: &StyleToggleEngine,
        kind: StyleKind,
        range: Range<usize>,
    ) {
        for alignment in StyleKind::ALIGNMENTS {
            StyleToggleEngine::carve(store, alignment, range.clone());
        }
        toggler.toggle(store, kind, range.start, range.end, true);
    }

    /// Affected lines whose state differs from the requested one.
    fn changed_lines(
        buffer: &TextBuffer,
        store: &SpanStore,
        kind: StyleKind,
        selection: Selection,
        engage: bool,
    ) -> Vec<Line> {
        affected_lines(buffer, selection)
            .into_iter()
            .filter(|line| !line.is_empty())
            .filter(|line| store.contains(kind, line.range.start, line.range.end) != engage)
            .collect()
    }
}
