//! Typing continuation: engaged styles follow newly typed text.
//!
//! Toggling a character style with a caret selection does not touch existing
//! text. It engages (or disengages) the style so that whatever is typed next
//! inherits it.

use crate::style::StyleKind;
use crate::text::span::SpanStore;
use crate::text::toggle::StyleToggleEngine;

/// Engaged flag and anchor for one style kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngagedStyle {
    pub engaged: bool,
    /// Caret offset where continuous application began.
    pub anchor: Option<usize>,
}

/// Engaged state of every toggleable style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngagedStyles {
    states: [EngagedStyle; StyleKind::TOGGLEABLE.len()],
}

impl EngagedStyles {
    /// Create with every style disengaged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `kind`. Non-toggleable kinds are never engaged.
    #[must_use]
    pub fn state(&self, kind: StyleKind) -> EngagedStyle {
        kind.toggle_index()
            .map_or_else(EngagedStyle::default, |idx| self.states[idx])
    }

    /// Check if `kind` is engaged.
    #[must_use]
    pub fn is_engaged(&self, kind: StyleKind) -> bool {
        self.state(kind).engaged
    }

    /// Flip `kind`, anchoring at `caret` when it becomes engaged.
    ///
    /// Returns the new engaged flag.
    pub fn toggle(&mut self, kind: StyleKind, caret: usize) -> bool {
        let Some(idx) = kind.toggle_index() else {
            return false;
        };
        let state = &mut self.states[idx];
        state.engaged = !state.engaged;
        state.anchor = state.engaged.then_some(caret);
        state.engaged
    }

    /// Disengage everything.
    pub fn reset(&mut self) {
        self.states = Default::default();
    }

    /// Kinds currently engaged.
    pub fn engaged_kinds(&self) -> impl Iterator<Item = StyleKind> + '_ {
        StyleKind::TOGGLEABLE
            .into_iter()
            .filter(|kind| self.is_engaged(*kind))
    }

    /// Extend every engaged style over text inserted at `at`.
    pub fn on_insert(&self, store: &mut SpanStore, toggler: &StyleToggleEngine, at: usize, len: usize) {
        for kind in self.engaged_kinds() {
            toggler.toggle(store, kind, at, at + len, true);
        }
    }
}
