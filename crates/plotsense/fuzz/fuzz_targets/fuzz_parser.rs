//! Fuzz target for the delimited-file parser.
//!
//! Checks that loading never panics on malformed input and that whatever
//! loads can be classified.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plotsense::Plotsense;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".csv") {
        if temp_file.write_all(data).is_ok() {
            let _ = Plotsense::new().load(temp_file.path());
        }
    }
});
