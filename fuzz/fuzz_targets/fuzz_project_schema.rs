//! Fuzz target for descriptor extraction from both project layouts.
//!
//! Goal: Parsing and deriving version/name/guid should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_project_schema
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = extproj_vsproj::fuzz::describe_legacy_bytes(data);
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = extproj_vsproj::fuzz::describe_legacy(text);
        let _ = extproj_vsproj::fuzz::describe_modern(text);
    }
});
