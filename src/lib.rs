//! `richnote` - Rich-text formatting engine for note editors
//!
//! Keeps a plain character buffer and a set of style spans in sync while the
//! user types, toggles character styles, structures lines as bullets or
//! quotes, aligns paragraphs, and walks a bounded undo history.
//!
//! The crate is UI-agnostic: it owns no widgets and draws nothing. A host
//! forwards edits and toolbar commands to [`RichTextEditor`] and re-renders
//! when its listener fires.
//!
//! ```
//! use richnote::{EditorOptions, RichTextEditor, StyleKind};
//!
//! let mut editor = RichTextEditor::with_options(EditorOptions::default());
//! editor.insert("Shopping\nMilk\nEggs");
//! editor.set_selection(9, 18);
//! editor.toggle_bullet();
//!
//! assert!(editor.style_at(10).has(StyleKind::Bullet));
//! assert!(!editor.style_at(2).has(StyleKind::Bullet));
//! ```

// Crate-level lint configuration
#![allow(dead_code)] // Public API functions not yet used internally
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::must_use_candidate)] // Command methods return nothing useful
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::unused_self)] // Engines keep a uniform &self surface
#![allow(clippy::cast_possible_truncation)] // Color channel casts
#![allow(clippy::cast_sign_loss)] // Color channel casts
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod color;
pub mod error;
pub mod event;
pub mod style;
pub mod text;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::EditorEvent;
pub use style::{QuoteStyle, StyleKind, TextAttributes};

// Re-export commonly used types
pub use text::{
    EditorOptions, History, RichTextEditor, Selection, SpanStore, StyleSpan, TextBuffer, TextEdit,
};
