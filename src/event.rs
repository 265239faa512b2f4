//! Change notifications emitted by the editor.
//!
//! Each [`RichTextEditor`](crate::RichTextEditor) owns at most one listener.
//! The surrounding UI uses it as its re-render trigger.

use crate::text::TextEdit;
use std::fmt;

/// What changed after an editor operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer content changed.
    TextChanged(TextEdit),
    /// Spans changed without a content change.
    StylesChanged,
    /// The selection moved.
    SelectionChanged { start: usize, end: usize },
    /// Undo or redo replaced the buffer content.
    HistoryReplayed { undo: bool },
}

pub(crate) type Listener = Box<dyn FnMut(&EditorEvent) + 'static>;

/// Holder for an optional listener.
#[derive(Default)]
pub(crate) struct EventSink {
    listener: Option<Listener>,
}

impl EventSink {
    pub(crate) fn set<F>(&mut self, listener: F)
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub(crate) fn clear(&mut self) {
        self.listener = None;
    }

    pub(crate) fn emit(&mut self, event: &EditorEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink")
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
