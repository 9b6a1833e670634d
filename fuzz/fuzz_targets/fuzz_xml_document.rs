//! Fuzz target for the owned XML tree reader.
//!
//! Goal: The reader should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_xml_document
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Err(err) = extproj_vsproj::xml::parse_document(text) {
            // Positions must be 1-based whenever they are reported.
            if let Some((line, col)) = err.position() {
                assert!(line >= 1 && col >= 1);
            }
        }
    }
});
