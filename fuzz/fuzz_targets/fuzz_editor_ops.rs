//! Fuzz target for editor command sequences.
//!
//! Drives RichTextEditor with arbitrary edits and toolbar commands and
//! checks that spans never escape the buffer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use richnote::RichTextEditor;

#[derive(Arbitrary, Debug)]
enum Op {
    Select(u8, u8),
    Insert(String),
    DeleteBackward,
    DeleteForward,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Bullet,
    Quote,
    AlignLeft,
    AlignRight,
    AlignCenter,
    Undo,
    Redo,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut editor = RichTextEditor::new();
    for op in ops {
        match op {
            Op::Select(a, b) => editor.set_selection(a.into(), b.into()),
            Op::Insert(text) => editor.insert(&text),
            Op::DeleteBackward => editor.delete_backward(),
            Op::DeleteForward => editor.delete_forward(),
            Op::Bold => editor.toggle_bold(),
            Op::Italic => editor.toggle_italic(),
            Op::Underline => editor.toggle_underline(),
            Op::Strikethrough => editor.toggle_strikethrough(),
            Op::Bullet => editor.toggle_bullet(),
            Op::Quote => editor.toggle_quote(),
            Op::AlignLeft => editor.align_left(),
            Op::AlignRight => editor.align_right(),
            Op::AlignCenter => editor.align_center(),
            Op::Undo => editor.undo(),
            Op::Redo => editor.redo(),
        }

        let len = editor.len_chars();
        for span in editor.spans().spans() {
            assert!(span.range.start < span.range.end, "empty span {span:?}");
            assert!(span.range.end <= len, "span {span:?} past {len}");
        }
    }
});
