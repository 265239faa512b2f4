//! Fuzz target for quote stripe color parsing.
//!
//! Rgba::from_hex must return None for garbage and round-trip anything it
//! accepts through to_hex.

#![no_main]

use libfuzzer_sys::fuzz_target;
use richnote::color::Rgba;

fuzz_target!(|data: &str| {
    let Some(color) = Rgba::from_hex(data) else {
        return;
    };
    let hex = color.to_hex();
    assert_eq!(Rgba::from_hex(&hex).map(|c| c.to_hex()), Some(hex));
});
