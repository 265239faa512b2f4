//! Text storage, style spans, and the editing engine.
//!
//! Everything in this module addresses text by char offset. Lines are
//! separated by `\n` and never stored; they are recomputed on demand.
//!
//! Key types:
//!
//! - [`TextBuffer`]: Rope-backed characters plus the current [`Selection`]
//! - [`SpanStore`]: Unordered collection of [`StyleSpan`]s that follow edits
//! - [`StyleToggleEngine`]: Applies and carves character styles
//! - [`LineStyleEngine`]: Bullets, quotes, and alignment per line
//! - [`EngagedStyles`]: Typing continuation at a caret
//! - [`History`]: Bounded snapshot undo/redo
//! - [`RichTextEditor`]: The controller that ties them together
//!
//! # Examples
//!
//! ## Styling a selection
//!
//! ```
//! use richnote::{RichTextEditor, StyleKind};
//!
//! let mut editor = RichTextEditor::with_text("Hello world");
//! editor.set_selection(6, 11);
//! editor.toggle_underline();
//! assert!(editor.style_at(8).has(StyleKind::Underline));
//! assert!(!editor.style_at(2).has(StyleKind::Underline));
//! ```
//!
//! ## Working with spans directly
//!
//! ```
//! use richnote::StyleKind;
//! use richnote::text::{SpanStore, StyleToggleEngine};
//!
//! let mut store = SpanStore::new();
//! let toggler = StyleToggleEngine::default();
//! toggler.toggle(&mut store, StyleKind::Bold, 0, 10, true);
//! toggler.toggle(&mut store, StyleKind::Bold, 3, 5, false);
//!
//! let mut ranges: Vec<_> = store.spans_of(StyleKind::Bold).map(|s| s.range.clone()).collect();
//! ranges.sort_by_key(|r| r.start);
//! assert_eq!(ranges, vec![0..3, 5..10]);
//! ```

mod buffer;
mod editor;
mod history;
mod lines;
mod markup;
mod rope;
mod span;
mod toggle;
mod typing;

pub use buffer::{Selection, TextBuffer, TextEdit};
pub use editor::{EditorOptions, RichTextEditor};
pub use history::{CaptureState, DEFAULT_HISTORY_CAPACITY, History};
pub use lines::{Line, LineStyleEngine, affected_lines, lines};
pub use markup::{MarkupDocument, parse_markup, to_markup};
pub use rope::RopeWrapper;
pub use span::{SpanStore, StyleSpan};
pub use toggle::StyleToggleEngine;
pub use typing::{EngagedStyle, EngagedStyles};
