//! End-to-end editing sessions driven through `RichTextEditor`.
//!
//! Each test replays what a user would do in a note editor: typing,
//! selecting, pressing toolbar buttons, undoing. Run with `RUST_LOG`-style
//! output via `--nocapture` to see the engine's tracing.

use richnote::{EditorEvent, EditorOptions, QuoteStyle, RichTextEditor, Rgba, StyleKind};
use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;
use tracing::Level;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

fn ranges(editor: &RichTextEditor, kind: StyleKind) -> Vec<Range<usize>> {
    editor
        .spans_of(kind)
        .into_iter()
        .map(|span| span.range)
        .collect()
}

fn type_text(editor: &mut RichTextEditor, text: &str) {
    for ch in text.chars() {
        editor.insert(ch.encode_utf8(&mut [0; 4]));
    }
}

#[test]
fn typing_with_engaged_styles() {
    init_logging();
    let mut editor = RichTextEditor::new();

    type_text(&mut editor, "Plain ");
    editor.toggle_bold();
    type_text(&mut editor, "bold ");
    editor.toggle_italic();
    type_text(&mut editor, "both");
    editor.toggle_bold();
    editor.toggle_italic();
    type_text(&mut editor, " done");

    assert_eq!(editor.text(), "Plain bold both done");
    assert_eq!(ranges(&editor, StyleKind::Bold), vec![6..15]);
    assert_eq!(ranges(&editor, StyleKind::Italic), vec![11..15]);
    assert!(editor.style_at(16).is_empty());
}

#[test]
fn selection_toggle_does_not_engage() {
    init_logging();
    let mut editor = RichTextEditor::with_text("Hello");
    editor.set_selection(0, 5);
    editor.toggle_strikethrough();
    editor.set_caret(5);
    assert!(!editor.is_engaged(StyleKind::Strikethrough));
    type_text(&mut editor, "!");
    assert_eq!(ranges(&editor, StyleKind::Strikethrough), vec![0..5]);
}

#[test]
fn bullets_across_lines() {
    init_logging();
    let mut editor = RichTextEditor::with_text("Hello\nWorld");

    editor.set_selection(0, 11);
    editor.toggle_bullet();
    assert_eq!(ranges(&editor, StyleKind::Bullet), vec![0..5, 6..11]);

    // A selection straddling the line break affects neither line.
    editor.set_selection(2, 8);
    editor.toggle_bullet();
    assert_eq!(ranges(&editor, StyleKind::Bullet), vec![0..5, 6..11]);

    editor.set_selection(0, 5);
    editor.set_bullet(false);
    assert_eq!(ranges(&editor, StyleKind::Bullet), vec![6..11]);
}

#[test]
fn newline_splits_bulleted_line() {
    init_logging();
    let mut editor = RichTextEditor::with_text("HelloWorld");
    editor.set_caret(3);
    editor.toggle_bullet();
    assert_eq!(ranges(&editor, StyleKind::Bullet), vec![0..10]);

    // Enter at the end of the line: the bullet does not grow onto the new line.
    editor.set_caret(10);
    editor.insert("\n");
    assert_eq!(ranges(&editor, StyleKind::Bullet), vec![0..10]);

    // Enter at the start of the line: the bullet moves with the text.
    editor.set_caret(0);
    editor.insert("\n");
    assert_eq!(ranges(&editor, StyleKind::Bullet), vec![1..11]);
}

#[test]
fn quote_with_custom_metadata() {
    init_logging();
    let quote = QuoteStyle::new(Rgba::from_rgba_u8(200, 40, 40, 255), 3, 5);
    let options = EditorOptions::default().with_quote(quote);
    let mut editor = RichTextEditor::with_options(options);
    type_text(&mut editor, "Intro\nCited");

    editor.set_caret(8);
    editor.toggle_quote();
    let quotes = editor.spans_of(StyleKind::Quote);
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].range, 6..11);
    assert_eq!(quotes[0].quote, Some(quote));
    assert!(editor.is_style_active(StyleKind::Quote));
    assert!(editor.style_at(6).has(StyleKind::Italic));
    assert!(editor.style_at(6).has(StyleKind::Highlight));
    assert!(!editor.style_at(0).has(StyleKind::Italic));

    editor.toggle_quote();
    assert!(editor.spans_of(StyleKind::Quote).is_empty());
    assert!(editor.style_at(6).has(StyleKind::Italic));
}

#[test]
fn alignment_round_trip() {
    init_logging();
    let mut editor = RichTextEditor::with_text("Title\nBody");

    editor.set_caret(1);
    editor.align_center();
    assert!(editor.is_style_active(StyleKind::AlignCenter));

    editor.align_right();
    assert!(!editor.is_style_active(StyleKind::AlignCenter));
    assert!(editor.is_style_active(StyleKind::AlignRight));

    editor.align_right();
    assert!(editor.is_style_active(StyleKind::AlignLeft));
    assert!(!editor.is_style_active(StyleKind::AlignRight));

    // Empty lines have nothing to align.
    let mut empty = RichTextEditor::with_text("a\n\nb");
    empty.set_caret(2);
    empty.align_center();
    assert!(empty.spans().is_empty());
}

#[test]
fn undo_after_formatting_session() {
    init_logging();
    let mut editor = RichTextEditor::new();
    type_text(&mut editor, "abc");
    editor.set_selection(0, 3);
    editor.toggle_bold();
    editor.set_caret(3);
    type_text(&mut editor, "de");

    assert!(editor.can_undo());
    editor.undo();
    assert_eq!(editor.text(), "abcd");
    assert_eq!(ranges(&editor, StyleKind::Bold), vec![0..3]);
    editor.redo();
    assert_eq!(editor.text(), "abcde");

    // New typing after undo stacks on top; there is nothing left to redo.
    editor.undo();
    editor.undo();
    type_text(&mut editor, "X");
    assert_eq!(editor.text(), "abcX");
    assert!(!editor.can_redo());

    editor.clear_history();
    assert!(!editor.can_undo());
}

#[test]
fn persistence_round_trip() {
    init_logging();
    let mut editor = RichTextEditor::with_text("Title\nA <note> & more");
    editor.set_selection(0, 5);
    editor.toggle_bold();
    editor.align_center();
    editor.set_selection(8, 14);
    editor.toggle_underline();

    let saved = editor.to_markup();
    let mut restored = RichTextEditor::new();
    restored.load_markup(&saved).unwrap();

    assert_eq!(restored.text(), editor.text());
    for kind in StyleKind::ALL {
        assert_eq!(ranges(&restored, kind), ranges(&editor, kind), "{kind}");
    }
    assert_eq!(restored.to_markup(), saved);
}

#[test]
fn listener_tracks_session() {
    init_logging();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut editor = RichTextEditor::with_text("Hello\nWorld");
    editor.set_listener(move |event| sink.borrow_mut().push(event.clone()));

    editor.set_caret(2);
    editor.toggle_bullet();
    editor.toggle_bold(); // caret: engagement only, no style change
    editor.clear_listener();
    editor.toggle_bullet();

    let seen = seen.borrow();
    assert_eq!(
        seen.as_slice(),
        &[
            EditorEvent::SelectionChanged { start: 2, end: 2 },
            EditorEvent::StylesChanged,
        ]
    );
}
