//! Fuzz target for the markup parser.
//!
//! Any input either fails cleanly or produces a document whose re-serialized
//! form parses back to the same text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use richnote::text::{parse_markup, to_markup};

fuzz_target!(|data: &str| {
    let Ok(doc) = parse_markup(data) else {
        return;
    };
    let len = doc.text.chars().count();
    assert!(doc.spans.spans().iter().all(|s| s.range.end <= len));

    let saved = to_markup(&doc.text, doc.spans.spans());
    let reloaded = parse_markup(&saved).expect("serialized markup must parse");
    assert_eq!(reloaded.text, doc.text);
});
