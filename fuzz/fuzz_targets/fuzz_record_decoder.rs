//! Fuzz target for record decoding.
//!
//! `decode_record` reads length-prefixed columns from untrusted bytes. A
//! corrupted length prefix must end in an error, not a panic, and any record
//! it accepts must re-encode to an equal record.

#![no_main]

use distmat_core::{decode_record, encode_record, OutputFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(record) = decode_record(data) else {
        return;
    };
    assert_eq!(record.row_indices().len(), record.distances().len());

    let bytes = encode_record(&record, OutputFormat::Bincode).expect("re-encode");
    let again = decode_record(&bytes).expect("decode re-encoded record");
    assert_eq!(again.row_indices(), record.row_indices());
    assert_eq!(again.col_indices(), record.col_indices());
    assert_eq!(again.distances().len(), record.distances().len());
});
