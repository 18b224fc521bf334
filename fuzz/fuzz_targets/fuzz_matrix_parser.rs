//! Fuzz target for the distance matrix line parser.
//!
//! Arbitrary bytes must either parse into an aligned record or fail with an
//! error; the parser must never panic.

#![no_main]

use distmat_core::{parse_reader, ParseOptions};
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    for strict_fields in [false, true] {
        let options = ParseOptions { strict_fields };
        if let Ok(record) = parse_reader(data, Path::new("fuzz.txt"), &options) {
            assert_eq!(record.row_indices().len(), record.col_indices().len());
            assert_eq!(record.row_indices().len(), record.distances().len());
        }
    }
});
