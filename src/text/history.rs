//! Bounded snapshot history for undo/redo.
//!
//! History stores full-text snapshots taken *before* each content change,
//! plus the most recent text, which is what redo returns to once the stack
//! is exhausted. Capture is driven by [`History::before_change`] and
//! [`History::after_change`]; undo and redo bracket their own buffer
//! mutation in [`CaptureState::Replaying`] so those mutations are never
//! captured.
//!
//! ```
//! use richnote::text::History;
//!
//! let mut history = History::new(100);
//! history.before_change("");
//! history.after_change("a");
//! history.before_change("a");
//! history.after_change("ab");
//!
//! let text = history.begin_undo().unwrap();
//! assert_eq!(text, "a");
//! history.end_replay();
//!
//! assert_eq!(history.begin_redo().as_deref(), Some("ab"));
//! history.end_replay();
//! ```

use std::collections::VecDeque;
use tracing::trace;

/// Default number of snapshots retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Capture state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    /// An edit is in flight; `before` is the text it started from.
    CapturingEdit { before: String },
    /// Undo/redo is mutating the buffer; capture is suppressed.
    Replaying,
}

/// Undo/redo snapshot stack.
#[derive(Clone, Debug)]
pub struct History {
    stack: VecDeque<String>,
    cursor: usize,
    capacity: usize,
    most_recent: Option<String>,
    state: CaptureState,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create a history holding at most `capacity` snapshots (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: VecDeque::new(),
            cursor: 0,
            capacity: capacity.max(1),
            most_recent: None,
            state: CaptureState::Idle,
        }
    }

    /// Maximum number of snapshots retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of snapshots currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Check if no snapshots are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Position of the next undo target plus one.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current capture state.
    #[must_use]
    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Check if undo/redo is in progress.
    #[must_use]
    pub fn is_replaying(&self) -> bool {
        self.state == CaptureState::Replaying
    }

    /// Text not yet pushed, i.e. the latest content seen by `after_change`.
    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.most_recent.as_deref()
    }

    /// Record the text an edit starts from.
    pub fn before_change(&mut self, current: &str) {
        if self.is_replaying() {
            return;
        }
        self.state = CaptureState::CapturingEdit {
            before: current.to_string(),
        };
    }

    /// Finish an edit: push the pre-edit snapshot if the text changed.
    pub fn after_change(&mut self, new_text: &str) {
        if self.is_replaying() {
            return;
        }
        self.most_recent = Some(new_text.to_string());

        let CaptureState::CapturingEdit { before } = std::mem::take(&mut self.state) else {
            return;
        };
        if before == new_text {
            return;
        }

        if self.stack.len() >= self.capacity {
            self.stack.pop_front();
        }
        self.stack.push_back(before);
        self.cursor = self.stack.len();
        trace!(len = self.stack.len(), "history snapshot pushed");
    }

    /// Abandon an edit that never reached the buffer.
    ///
    /// Returns to [`CaptureState::Idle`] without recording anything, so the
    /// redo target survives.
    pub fn cancel_change(&mut self) {
        if matches!(self.state, CaptureState::CapturingEdit { .. }) {
            self.state = CaptureState::Idle;
        }
    }

    /// Check whether undo would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty() && self.cursor > 0
    }

    /// Check whether redo would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        if self.cursor + 1 < self.stack.len() {
            return true;
        }
        match self.most_recent.as_deref() {
            Some(latest) => self.text_at_cursor() != Some(latest),
            None => false,
        }
    }

    /// Step back. Enters [`CaptureState::Replaying`] and returns the text to
    /// restore; the caller applies it and then calls [`History::end_replay`].
    pub fn begin_undo(&mut self) -> Option<String> {
        if !self.can_undo() {
            return None;
        }
        self.state = CaptureState::Replaying;
        self.cursor -= 1;
        self.stack.get(self.cursor).cloned()
    }

    /// Step forward. Same protocol as [`History::begin_undo`].
    pub fn begin_redo(&mut self) -> Option<String> {
        if !self.can_redo() {
            return None;
        }
        self.state = CaptureState::Replaying;
        if self.cursor + 1 < self.stack.len() {
            self.cursor += 1;
            self.stack.get(self.cursor).cloned()
        } else {
            self.cursor = self.stack.len();
            self.most_recent.clone()
        }
    }

    /// Leave [`CaptureState::Replaying`].
    pub fn end_replay(&mut self) {
        if self.is_replaying() {
            self.state = CaptureState::Idle;
        }
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.cursor = 0;
        self.most_recent = None;
        self.state = CaptureState::Idle;
    }

    /// The text the buffer shows when the cursor sits at its position.
    fn text_at_cursor(&self) -> Option<&str> {
        self.stack
            .get(self.cursor)
            .map(String::as_str)
            .or(self.most_recent.as_deref())
    }
}
