//! The rich-text editor: buffer, spans, and history behind one command surface.
//!
//! [`RichTextEditor`] is the thin orchestrator the toolbar and the editing
//! surface talk to. Content edits flow through a single path that keeps
//! spans attached to their text, extends engaged styles over typed text,
//! and brackets the change with history capture. Commands act on the
//! current selection and report nothing back; the optional listener is
//! told what changed.
//!
//! # Examples
//!
//! ```
//! use richnote::{RichTextEditor, StyleKind};
//!
//! let mut editor = RichTextEditor::new();
//! editor.toggle_bold(); // caret: engage bold for typing
//! editor.insert("Hello");
//! editor.toggle_bold();
//! editor.insert(" world");
//!
//! assert_eq!(editor.text(), "Hello world");
//! assert!(editor.spans().contains(StyleKind::Bold, 0, 5));
//! assert!(!editor.spans().contains(StyleKind::Bold, 5, 11));
//!
//! editor.undo();
//! assert_eq!(editor.text(), "Hello");
//! ```

use crate::color::Rgba;
use crate::error::Result;
use crate::event::{EditorEvent, EventSink};
use crate::style::{QuoteStyle, StyleKind, TextAttributes};
use crate::text::buffer::{Selection, TextBuffer, TextEdit};
use crate::text::history::{DEFAULT_HISTORY_CAPACITY, History};
use crate::text::lines::{self, Line, LineStyleEngine};
use crate::text::markup::{self, MarkupDocument};
use crate::text::span::{SpanStore, StyleSpan};
use crate::text::toggle::StyleToggleEngine;
use crate::text::typing::EngagedStyles;
use std::ops::Range;
use tracing::{debug, trace};

/// Editor configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorOptions {
    /// Maximum undo snapshots retained.
    pub history_capacity: usize,
    /// Merge touching spans of the same kind when a style is applied.
    pub coalesce_on_apply: bool,
    /// Metadata stamped on new quote spans.
    pub quote: QuoteStyle,
    /// Background color for the highlight that accompanies quotes.
    pub highlight: Rgba,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            coalesce_on_apply: true,
            quote: QuoteStyle::default(),
            highlight: Rgba::YELLOW,
        }
    }
}

impl EditorOptions {
    /// Set the maximum number of undo snapshots.
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Enable or disable merging on apply.
    #[must_use]
    pub const fn with_coalesce_on_apply(mut self, coalesce: bool) -> Self {
        self.coalesce_on_apply = coalesce;
        self
    }

    /// Set the metadata stamped on new quote spans.
    #[must_use]
    pub const fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    /// Set the highlight color hosts paint behind quoted lines.
    #[must_use]
    pub const fn with_highlight(mut self, highlight: Rgba) -> Self {
        self.highlight = highlight;
        self
    }
}

/// Rich-text editing engine for a single document.
///
/// Owns its buffer, spans, and history exclusively; two documents never
/// share state.
#[derive(Debug)]
pub struct RichTextEditor {
    buffer: TextBuffer,
    spans: SpanStore,
    toggler: StyleToggleEngine,
    line_styles: LineStyleEngine,
    engaged: EngagedStyles,
    history: History,
    options: EditorOptions,
    events: EventSink,
}

impl Default for RichTextEditor {
    fn default() -> Self {
        Self::with_options(EditorOptions::default())
    }
}

impl RichTextEditor {
    /// Create an empty editor with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty editor.
    #[must_use]
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            buffer: TextBuffer::new(),
            spans: SpanStore::new(),
            toggler: StyleToggleEngine::new(options.coalesce_on_apply),
            line_styles: LineStyleEngine::new(options.quote),
            engaged: EngagedStyles::new(),
            history: History::new(options.history_capacity),
            options,
            events: EventSink::default(),
        }
    }

    /// Create an editor holding plain text, caret at the start, no history.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.buffer = TextBuffer::with_text(text);
        editor
    }

    /// Create an editor from persisted markup.
    pub fn from_markup(markup: &str, options: EditorOptions) -> Result<Self> {
        let mut editor = Self::with_options(options);
        editor.load_markup(markup)?;
        Ok(editor)
    }

    /// Options this editor was built with.
    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.buffer.selection()
    }

    /// The span store.
    #[must_use]
    pub fn spans(&self) -> &SpanStore {
        &self.spans
    }

    /// Spans of one kind, sorted by start.
    #[must_use]
    pub fn spans_of(&self, kind: StyleKind) -> Vec<StyleSpan> {
        let mut spans: Vec<StyleSpan> = self.spans.spans_of(kind).cloned().collect();
        spans.sort_by_key(|span| (span.range.start, span.range.end));
        spans
    }

    /// Every style on the char at `pos`.
    #[must_use]
    pub fn style_at(&self, pos: usize) -> TextAttributes {
        self.spans.attributes_at(pos)
    }

    /// Current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        lines::lines(&self.buffer)
    }

    /// Whether a toolbar should show `kind` as on for the current selection.
    ///
    /// Character styles at a caret count as on when engaged or when both
    /// neighbouring characters carry them. Line styles are on when every
    /// affected line carries them.
    #[must_use]
    pub fn is_style_active(&self, kind: StyleKind) -> bool {
        let sel = self.selection();
        if kind.is_character_level() {
            return (sel.is_caret() && self.engaged.is_engaged(kind))
                || self.spans.contains(kind, sel.start, sel.end);
        }
        if kind.is_alignment() {
            return LineStyleEngine::resolve_range(&self.buffer, sel)
                .is_some_and(|range| self.spans.contains(kind, range.start, range.end));
        }
        LineStyleEngine::all_styled(&self.buffer, &self.spans, kind, sel).unwrap_or(false)
    }

    /// Check if `kind` is engaged for typing continuation.
    #[must_use]
    pub fn is_engaged(&self, kind: StyleKind) -> bool {
        self.engaged.is_engaged(kind)
    }

    /// Engaged state of every toggleable style.
    #[must_use]
    pub fn engaged_styles(&self) -> &EngagedStyles {
        &self.engaged
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Check whether [`undo`](Self::undo) would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check whether [`redo`](Self::redo) would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---------------------------------------------------------------------
    // Selection and notifications
    // ---------------------------------------------------------------------

    /// Set the selection (clamped and normalized).
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.buffer.set_selection(start, end);
        self.emit_selection();
    }

    /// Collapse the selection to a caret.
    pub fn set_caret(&mut self, offset: usize) {
        self.buffer.set_caret(offset);
        self.emit_selection();
    }

    /// Install the change listener, replacing any previous one.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        self.events.set(listener);
    }

    /// Remove the change listener.
    pub fn clear_listener(&mut self) {
        self.events.clear();
    }

    // ---------------------------------------------------------------------
    // Content edits
    // ---------------------------------------------------------------------

    /// Type `text` at the selection, replacing any selected text.
    pub fn insert(&mut self, text: &str) {
        let sel = self.selection();
        self.replace_range(sel.start, sel.end, text);
    }

    /// Delete the selection, or the char before the caret.
    pub fn delete_backward(&mut self) {
        let sel = self.selection();
        if !sel.is_caret() {
            self.replace_range(sel.start, sel.end, "");
        } else if sel.start > 0 {
            self.replace_range(sel.start - 1, sel.start, "");
        }
    }

    /// Delete the selection, or the char after the caret.
    pub fn delete_forward(&mut self) {
        let sel = self.selection();
        if !sel.is_caret() {
            self.replace_range(sel.start, sel.end, "");
        } else if sel.start < self.len_chars() {
            self.replace_range(sel.start, sel.start + 1, "");
        }
    }

    /// Replace `[start, end)` with `text`: the editing surface's change event.
    ///
    /// Out-of-range or empty edits are ignored. The caret ends up after the
    /// inserted text.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let before = self.text();
        self.history.before_change(&before);

        let Some(edit) = self.buffer.replace(start..end, text) else {
            self.history.cancel_change();
            return;
        };
        self.after_edit(&edit, text);

        let after = self.text();
        self.history.after_change(&after);
        self.events.emit(&EditorEvent::TextChanged(edit));
    }

    fn after_edit(&mut self, edit: &TextEdit, inserted: &str) {
        self.spans.adjust_for_edit(edit, inserted);
        if edit.inserted > 0 && !self.history.is_replaying() {
            self.engaged
                .on_insert(&mut self.spans, &self.toggler, edit.offset, edit.inserted);
        }
        trace!(
            offset = edit.offset,
            removed = edit.removed,
            inserted = edit.inserted,
            "buffer edited"
        );
    }

    // ---------------------------------------------------------------------
    // Character style commands
    // ---------------------------------------------------------------------

    /// Toggle bold on the selection, or engage it at a caret.
    pub fn toggle_bold(&mut self) {
        self.toggle_character_style(StyleKind::Bold);
    }

    /// Toggle italic on the selection, or engage it at a caret.
    pub fn toggle_italic(&mut self) {
        self.toggle_character_style(StyleKind::Italic);
    }

    /// Toggle underline on the selection, or engage it at a caret.
    pub fn toggle_underline(&mut self) {
        self.toggle_character_style(StyleKind::Underline);
    }

    /// Toggle strikethrough on the selection, or engage it at a caret.
    pub fn toggle_strikethrough(&mut self) {
        self.toggle_character_style(StyleKind::Strikethrough);
    }

    /// Toggle a character style on the selection.
    ///
    /// With a caret, flips the engaged flag and leaves existing text alone.
    /// Otherwise removes the style if the whole selection has it, or applies
    /// it, without touching the engaged flag.
    pub fn toggle_character_style(&mut self, kind: StyleKind) {
        if kind.toggle_index().is_none() {
            return;
        }
        let sel = self.selection();
        if sel.is_caret() {
            let engaged = self.engaged.toggle(kind, sel.start);
            debug!(%kind, engaged, caret = sel.start, "typing style toggled");
            return;
        }

        let engage = !self.spans.contains(kind, sel.start, sel.end);
        self.toggler
            .toggle(&mut self.spans, kind, sel.start, sel.end, engage);
        debug!(%kind, engage, start = sel.start, end = sel.end, "character style toggled");
        self.events.emit(&EditorEvent::StylesChanged);
    }

    // ---------------------------------------------------------------------
    // Line style commands
    // ---------------------------------------------------------------------

    /// Bullet the affected lines, or remove bullets if all already have one.
    pub fn toggle_bullet(&mut self) {
        if let Some(all) = self.all_lines_styled(StyleKind::Bullet) {
            self.set_bullet(!all);
        }
    }

    /// Quote the affected lines, or un-quote them if all are quoted.
    pub fn toggle_quote(&mut self) {
        if let Some(all) = self.all_lines_styled(StyleKind::Quote) {
            self.set_quote(!all);
        }
    }

    /// Bullet (`engage`) or un-bullet the affected lines.
    pub fn set_bullet(&mut self, engage: bool) {
        let sel = self.selection();
        let changed = self
            .line_styles
            .set_bullet(&self.buffer, &mut self.spans, sel, engage);
        self.finish_line_command(StyleKind::Bullet, engage, changed);
    }

    /// Quote (`engage`) or un-quote the affected lines.
    pub fn set_quote(&mut self, engage: bool) {
        let sel = self.selection();
        let changed =
            self.line_styles
                .set_quote(&self.buffer, &mut self.spans, &self.toggler, sel, engage);
        self.finish_line_command(StyleKind::Quote, engage, changed);
    }

    /// Left-align the selection, or the caret's line. Never toggles off.
    pub fn align_left(&mut self) {
        let sel = self.selection();
        let changed =
            self.line_styles
                .align_left(&self.buffer, &mut self.spans, &self.toggler, sel);
        self.finish_line_command(StyleKind::AlignLeft, true, changed);
    }

    /// Right-align, or fall back to left if already right-aligned.
    pub fn align_right(&mut self) {
        let sel = self.selection();
        let changed =
            self.line_styles
                .align_right(&self.buffer, &mut self.spans, &self.toggler, sel);
        self.finish_line_command(StyleKind::AlignRight, true, changed);
    }

    /// Center, or fall back to left if already centered.
    pub fn align_center(&mut self) {
        let sel = self.selection();
        let changed =
            self.line_styles
                .align_center(&self.buffer, &mut self.spans, &self.toggler, sel);
        self.finish_line_command(StyleKind::AlignCenter, true, changed);
    }

    fn all_lines_styled(&self, kind: StyleKind) -> Option<bool> {
        LineStyleEngine::all_styled(&self.buffer, &self.spans, kind, self.selection())
    }

    fn finish_line_command(&mut self, kind: StyleKind, engage: bool, changed: bool) {
        debug!(%kind, engage, changed, "line style command");
        if changed {
            self.events.emit(&EditorEvent::StylesChanged);
        }
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Restore the previous snapshot. No-op when there is nothing to undo.
    pub fn undo(&mut self) {
        let Some(text) = self.history.begin_undo() else {
            return;
        };
        self.replay(&text, true);
    }

    /// Re-apply the next snapshot. No-op when there is nothing to redo.
    pub fn redo(&mut self) {
        let Some(text) = self.history.begin_redo() else {
            return;
        };
        self.replay(&text, false);
    }

    fn replay(&mut self, text: &str, undo: bool) {
        // History is in its replaying state here, so the edit is not captured
        // and engaged styles are not extended over restored text.
        if let Some(edit) = self.buffer.set_text(text) {
            let inserted = self.buffer.slice(edit.inserted_range());
            self.after_edit(&edit, &inserted);
        }
        self.history.end_replay();

        self.buffer.set_caret(self.len_chars());
        debug!(undo, chars = self.len_chars(), "history replayed");
        self.events.emit(&EditorEvent::HistoryReplayed { undo });
    }

    /// Forget every undo snapshot.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Serialize text and spans to markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        markup::to_markup(&self.text(), self.spans.spans())
    }

    /// Replace the document with parsed markup.
    ///
    /// Resets selection, engaged styles, and history. On error the editor is
    /// left untouched.
    pub fn load_markup(&mut self, input: &str) -> Result<()> {
        let MarkupDocument { text, mut spans } = markup::parse_markup(input)?;
        spans.clamp_to(text.chars().count());
        self.buffer = TextBuffer::with_text(&text);
        self.spans = spans;
        self.engaged.reset();
        self.history.clear();
        debug!(chars = self.len_chars(), spans = self.spans.len(), "markup loaded");
        self.events.emit(&EditorEvent::TextChanged(TextEdit {
            offset: 0,
            removed: 0,
            inserted: self.len_chars(),
        }));
        Ok(())
    }

    /// Apply or carve `kind` over an explicit range, bypassing the selection.
    pub fn set_style(&mut self, kind: StyleKind, range: Range<usize>, engage: bool) {
        let len = self.len_chars();
        let (start, end) = (range.start.min(len), range.end.min(len));
        self.toggler.toggle(&mut self.spans, kind, start, end, engage);
        self.events.emit(&EditorEvent::StylesChanged);
    }

    fn emit_selection(&mut self) {
        let sel = self.selection();
        self.events.emit(&EditorEvent::SelectionChanged {
            start: sel.start,
            end: sel.end,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ranges(editor: &RichTextEditor, kind: StyleKind) -> Vec<Range<usize>> {
        editor
            .spans_of(kind)
            .into_iter()
            .map(|span| span.range)
            .collect()
    }

    #[test]
    fn test_toggle_bold_over_selection() {
        let mut editor = RichTextEditor::with_text("Hello world");
        editor.set_selection(0, 5);
        editor.toggle_bold();
        assert_eq!(ranges(&editor, StyleKind::Bold), vec![0..5]);
        assert!(!editor.is_engaged(StyleKind::Bold));

        editor.set_selection(1, 3);
        editor.toggle_bold();
        assert_eq!(ranges(&editor, StyleKind::Bold), vec![0..1, 3..5]);
    }

    #[test]
    fn test_partially_bold_selection_gets_bolded() {
        let mut editor = RichTextEditor::with_text("abcdef");
        editor.set_selection(0, 2);
        editor.toggle_bold();
        editor.set_selection(0, 6);
        editor.toggle_bold();
        assert_eq!(ranges(&editor, StyleKind::Bold), vec![0..6]);
    }

    #[test]
    fn test_caret_toggle_engages_without_styling() {
        let mut editor = RichTextEditor::with_text("abc");
        editor.set_caret(3);
        editor.toggle_italic();
        assert!(editor.is_engaged(StyleKind::Italic));
        assert!(editor.spans().is_empty());

        editor.insert("de");
        assert_eq!(ranges(&editor, StyleKind::Italic), vec![3..5]);
        editor.insert("f");
        assert_eq!(ranges(&editor, StyleKind::Italic), vec![3..6]);
    }

    #[test]
    fn test_typing_after_styled_text_without_engagement() {
        let mut editor = RichTextEditor::with_text("ab");
        editor.set_selection(0, 2);
        editor.toggle_underline();
        editor.set_caret(2);
        editor.insert("c");
        assert_eq!(ranges(&editor, StyleKind::Underline), vec![0..2]);

        // Typing inside the span inherits it.
        editor.set_caret(1);
        editor.insert("x");
        assert_eq!(ranges(&editor, StyleKind::Underline), vec![0..3]);
    }

    #[test]
    fn test_is_style_active() {
        let mut editor = RichTextEditor::with_text("AB");
        editor.set_selection(0, 1);
        editor.toggle_bold();
        editor.set_caret(1);
        assert!(!editor.is_style_active(StyleKind::Bold));
        editor.set_selection(0, 1);
        assert!(editor.is_style_active(StyleKind::Bold));

        editor.set_caret(2);
        editor.toggle_strikethrough();
        assert!(editor.is_style_active(StyleKind::Strikethrough));
    }

    #[test]
    fn test_bullet_commands() {
        let mut editor = RichTextEditor::with_text("Hello\nWorld");
        editor.set_selection(0, 11);
        editor.toggle_bullet();
        assert_eq!(ranges(&editor, StyleKind::Bullet), vec![0..5, 6..11]);
        assert!(editor.is_style_active(StyleKind::Bullet));

        editor.set_selection(0, 5);
        editor.toggle_bullet();
        assert_eq!(ranges(&editor, StyleKind::Bullet), vec![6..11]);

        // Mixed state: bullets everything.
        editor.set_selection(0, 11);
        editor.toggle_bullet();
        assert_eq!(ranges(&editor, StyleKind::Bullet), vec![0..5, 6..11]);
    }

    #[test]
    fn test_bullet_follows_typing_at_line_end() {
        let mut editor = RichTextEditor::with_text("Hello\nWorld");
        editor.set_caret(2);
        editor.toggle_bullet();
        editor.set_caret(5);
        editor.insert("!");
        assert_eq!(ranges(&editor, StyleKind::Bullet), vec![0..6]);
        assert!(editor.is_style_active(StyleKind::Bullet));
    }

    #[test]
    fn test_quote_toggle() {
        let mut editor = RichTextEditor::with_text("Hello\nWorld");
        editor.set_caret(8);
        editor.toggle_quote();
        assert_eq!(ranges(&editor, StyleKind::Quote), vec![6..11]);
        assert!(editor.style_at(7).has(StyleKind::Italic));
        assert!(editor.style_at(7).has(StyleKind::Highlight));

        editor.toggle_quote();
        assert!(ranges(&editor, StyleKind::Quote).is_empty());
        assert!(editor.style_at(7).has(StyleKind::Italic));
    }

    #[test]
    fn test_alignment_commands() {
        let mut editor = RichTextEditor::with_text("Hello\nWorld");
        editor.set_caret(7);
        editor.align_center();
        assert_eq!(ranges(&editor, StyleKind::AlignCenter), vec![6..11]);
        assert!(editor.is_style_active(StyleKind::AlignCenter));

        editor.align_right();
        assert!(ranges(&editor, StyleKind::AlignCenter).is_empty());
        assert_eq!(ranges(&editor, StyleKind::AlignRight), vec![6..11]);

        editor.align_right();
        assert!(ranges(&editor, StyleKind::AlignRight).is_empty());
        assert_eq!(ranges(&editor, StyleKind::AlignLeft), vec![6..11]);
    }

    #[test]
    fn test_undo_redo_restores_text_and_caret() {
        let mut editor = RichTextEditor::new();
        editor.insert("one");
        editor.insert(" two");
        editor.set_selection(0, 3);
        editor.insert("1");
        assert_eq!(editor.text(), "1 two");

        editor.undo();
        assert_eq!(editor.text(), "one two");
        assert_eq!(editor.selection(), Selection::caret(7));
        editor.undo();
        assert_eq!(editor.text(), "one");
        editor.undo();
        assert_eq!(editor.text(), "");
        editor.undo();
        assert_eq!(editor.text(), "");

        editor.redo();
        editor.redo();
        editor.redo();
        assert_eq!(editor.text(), "1 two");
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_undo_keeps_spans_outside_change() {
        let mut editor = RichTextEditor::with_text("Hello");
        editor.set_selection(0, 5);
        editor.toggle_bold();
        editor.set_caret(5);
        editor.insert(" world");
        editor.undo();
        assert_eq!(editor.text(), "Hello");
        assert_eq!(ranges(&editor, StyleKind::Bold), vec![0..5]);
    }

    #[test]
    fn test_replay_does_not_extend_engaged_styles() {
        let mut editor = RichTextEditor::new();
        editor.insert("abc");
        editor.set_caret(3);
        editor.undo();
        editor.toggle_bold();
        assert!(editor.is_engaged(StyleKind::Bold));
        editor.redo();
        assert_eq!(editor.text(), "abc");
        assert!(editor.spans_of(StyleKind::Bold).is_empty());
    }

    #[test]
    fn test_degenerate_edits_are_ignored() {
        let mut editor = RichTextEditor::with_text("abc");
        editor.replace_range(10, 12, "x");
        editor.replace_range(1, 1, "");
        editor.delete_backward();
        assert_eq!(editor.text(), "abc");
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_rejected_edit_keeps_redo_target() {
        let mut editor = RichTextEditor::new();
        editor.insert("a");
        editor.undo();
        assert_eq!(editor.text(), "");

        editor.insert("");
        editor.replace_range(5, 6, "z");
        assert!(editor.can_redo());
        editor.redo();
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn test_edit_after_undo_keeps_older_snapshots() {
        let mut editor = RichTextEditor::new();
        editor.insert("a");
        editor.insert("b");
        editor.undo();
        editor.insert("x");
        assert_eq!(editor.text(), "ax");
        assert_eq!(editor.history().len(), 3);
        assert!(!editor.can_redo());

        editor.undo();
        assert_eq!(editor.text(), "a");
        editor.undo();
        assert_eq!(editor.text(), "a");
        editor.undo();
        assert_eq!(editor.text(), "");
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_accessors_reflect_state() {
        let options = EditorOptions::default().with_highlight(Rgba::WHITE);
        let mut editor = RichTextEditor::with_options(options);
        editor.insert("one
two");
        editor.toggle_italic();

        assert_eq!(editor.options().highlight, Rgba::WHITE);
        assert_eq!(editor.buffer().len_chars(), 7);
        assert_eq!(
            editor.lines().into_iter().map(|line| line.range).collect::<Vec<_>>(),
            vec![0..3, 4..7]
        );
        assert_eq!(
            editor.engaged_styles().engaged_kinds().collect::<Vec<_>>(),
            vec![StyleKind::Italic]
        );
    }

    #[test]
    fn test_delete_commands() {
        let mut editor = RichTextEditor::with_text("abcd");
        editor.set_caret(2);
        editor.delete_backward();
        assert_eq!(editor.text(), "acd");
        editor.delete_forward();
        assert_eq!(editor.text(), "ad");
        editor.set_selection(0, 2);
        editor.delete_forward();
        assert_eq!(editor.text(), "");
        editor.delete_forward();
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_history_capacity_from_options() {
        let options = EditorOptions::default().with_history_capacity(2);
        let mut editor = RichTextEditor::with_options(options);
        for ch in ["a", "b", "c", "d"] {
            editor.insert(ch);
        }
        assert_eq!(editor.history().len(), 2);
        editor.undo();
        editor.undo();
        editor.undo();
        assert_eq!(editor.text(), "ab");
    }

    #[test]
    fn test_markup_roundtrip_through_editor() {
        let mut editor = RichTextEditor::with_text("Hello\nWorld");
        editor.set_selection(0, 5);
        editor.toggle_bold();
        editor.set_caret(8);
        editor.toggle_quote();

        let markup = editor.to_markup();
        let restored = RichTextEditor::from_markup(&markup, EditorOptions::default()).unwrap();
        assert_eq!(restored.text(), editor.text());
        for kind in StyleKind::ALL {
            assert_eq!(ranges(&restored, kind), ranges(&editor, kind), "{kind}");
        }
        assert!(!restored.can_undo());
    }

    #[test]
    fn test_failed_load_leaves_editor_untouched() {
        let mut editor = RichTextEditor::with_text("keep");
        assert!(editor.load_markup("<b>broken").is_err());
        assert_eq!(editor.text(), "keep");
    }

    #[test]
    fn test_listener_sees_events() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut editor = RichTextEditor::new();
        editor.set_listener(move |event| sink.borrow_mut().push(event.clone()));

        editor.insert("hi");
        editor.set_selection(0, 2);
        editor.toggle_bold();
        editor.undo();

        assert_eq!(
            events.borrow().as_slice(),
            &[
                EditorEvent::TextChanged(TextEdit {
                    offset: 0,
                    removed: 0,
                    inserted: 2
                }),
                EditorEvent::SelectionChanged { start: 0, end: 2 },
                EditorEvent::StylesChanged,
                EditorEvent::HistoryReplayed { undo: true },
            ]
        );
    }

    #[test]
    fn test_set_style_explicit_range() {
        let mut editor = RichTextEditor::with_text("abc");
        editor.set_style(StyleKind::Highlight, 1..10, true);
        assert_eq!(ranges(&editor, StyleKind::Highlight), vec![1..3]);
        editor.set_style(StyleKind::Highlight, 0..2, false);
        assert_eq!(ranges(&editor, StyleKind::Highlight), vec![2..3]);
    }
}
