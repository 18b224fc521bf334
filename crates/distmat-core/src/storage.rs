//! Record persistence.
//!
//! # Binary layout
//!
//! ```text
//! [magic "DMX1": 4 bytes][version: u16 LE][bincode payload]
//! ```
//!
//! The payload is the bincode encoding of [`DistanceMatrixRecord`]: the
//! `texts1`, `texts2` and `NVS` columns in that order, each length-prefixed.
//! The JSON format writes the same three keys as a plain object and carries
//! no header.

use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::DistanceMatrixRecord;

/// Magic bytes at the start of a binary record file.
pub const RECORD_MAGIC: &[u8; 4] = b"DMX1";

/// Current binary format version.
pub const RECORD_VERSION: u16 = 1;

const HEADER_LEN: usize = RECORD_MAGIC.len() + std::mem::size_of::<u16>();

/// Fixed-width little-endian layout of `bincode::serialize`; trailing bytes
/// after the payload are an error.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encoding of the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Headered bincode payload (default).
    #[default]
    Bincode,
    /// JSON object with `texts1`, `texts2`, `NVS` keys.
    Json,
}

/// Options controlling how a record is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Output encoding.
    pub format: OutputFormat,
    /// Write to a uniquely named sibling temp file, fsync, then rename over
    /// the target.
    pub atomic: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Bincode,
            atomic: true,
        }
    }
}

/// Encodes a record in the given format.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if encoding fails, including JSON output
/// of a record with non-finite distances.
pub fn encode_record(record: &DistanceMatrixRecord, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Bincode => {
            let payload = codec()
                .serialize(record)
                .map_err(|e| Error::Serialization(e.to_string()))?;
            let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
            bytes.extend_from_slice(RECORD_MAGIC);
            bytes.extend_from_slice(&RECORD_VERSION.to_le_bytes());
            bytes.extend_from_slice(&payload);
            Ok(bytes)
        }
        OutputFormat::Json => {
            if let Some(k) = record.distances().iter().position(|d| !d.is_finite()) {
                return Err(Error::Serialization(format!(
                    "JSON cannot represent non-finite distance {} at entry {k}",
                    record.distances()[k]
                )));
            }
            serde_json::to_vec(record).map_err(|e| Error::Serialization(e.to_string()))
        }
    }
}

/// Decodes a record, detecting the format from the header.
///
/// # Errors
///
/// Returns [`Error::CorruptedRecord`] if the bytes are neither a valid binary
/// record nor a valid JSON record.
pub fn decode_record(bytes: &[u8]) -> Result<DistanceMatrixRecord> {
    if let Some(rest) = bytes.strip_prefix(RECORD_MAGIC.as_slice()) {
        let (version, payload) = rest.split_at_checked(2).ok_or_else(|| {
            Error::CorruptedRecord("header truncated before version".to_string())
        })?;
        let version = u16::from_le_bytes([version[0], version[1]]);
        if version != RECORD_VERSION {
            return Err(Error::CorruptedRecord(format!(
                "unsupported format version {version} (expected {RECORD_VERSION})"
            )));
        }
        return codec()
            .deserialize(payload)
            .map_err(|e| Error::CorruptedRecord(format!("invalid binary payload: {e}")));
    }

    serde_json::from_slice(bytes)
        .map_err(|e| Error::CorruptedRecord(format!("not a distance matrix record: {e}")))
}

/// Writes `record` to `path` in a single write.
///
/// Returns the number of bytes written. Nothing is created if encoding fails.
/// With `atomic` set, a failed write leaves any existing file at `path`
/// untouched.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if encoding fails and [`Error::Write`] if
/// the file cannot be written.
pub fn save_record(
    record: &DistanceMatrixRecord,
    path: &Path,
    options: &OutputOptions,
) -> Result<u64> {
    let bytes = encode_record(record, options.format)?;
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if options.atomic {
        write_atomic(path, &bytes).map_err(write_err)?;
    } else {
        File::create(path)
            .and_then(|mut file| file.write_all(&bytes))
            .map_err(write_err)?;
    }

    debug!(
        path = %path.display(),
        format = ?options.format,
        bytes = bytes.len(),
        "Record written"
    );
    Ok(bytes.len() as u64)
}

/// Reads and decodes the record stored at `path`.
///
/// # Errors
///
/// Returns [`Error::InputOpen`] if the file cannot be read and
/// [`Error::CorruptedRecord`] if its content is not a record.
pub fn load_record(path: &Path) -> Result<DistanceMatrixRecord> {
    let bytes = fs::read(path).map_err(|source| Error::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    decode_record(&bytes)
}

/// Writes through a uniquely named temp file in the target's directory, then
/// renames it over `path`. The temp file is deleted if any step fails.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = Builder::new()
        .prefix(".distmat-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
