//! Line parser for ELKI distance matrix text files.
//!
//! Each line holds `row_index col_index distance`, separated by a single
//! space and never quoted. The first malformed line aborts the parse.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, LineFault, Result};
use crate::record::{DistanceMatrixEntry, DistanceMatrixRecord};

/// Field separator of the input format.
pub const FIELD_DELIMITER: char = ' ';

const READ_BUFFER_SIZE: usize = 128 * 1024;

/// Parsing options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject lines with more than three fields instead of ignoring the rest.
    pub strict_fields: bool,
}

/// Parses one line.
///
/// Returns `Ok(None)` for an empty line. A trailing `\r` is dropped and each
/// field is trimmed before numeric conversion, but consecutive delimiters
/// still yield empty fields that fail to parse.
///
/// # Errors
///
/// Returns the [`LineFault`] describing the first violation found.
pub fn parse_line(
    line: &str,
    options: &ParseOptions,
) -> std::result::Result<Option<DistanceMatrixEntry>, LineFault> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split(FIELD_DELIMITER);
    let (Some(row), Some(col), Some(distance)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(LineFault::MissingFields {
            found: line.split(FIELD_DELIMITER).count(),
        });
    };

    if options.strict_fields {
        let extra = fields.count();
        if extra > 0 {
            return Err(LineFault::ExtraFields { found: 3 + extra });
        }
    }

    let row_index = row.trim().parse().map_err(LineFault::InvalidRowIndex)?;
    let col_index = col.trim().parse().map_err(LineFault::InvalidColIndex)?;
    let distance = distance
        .trim()
        .parse()
        .map_err(LineFault::InvalidDistance)?;

    Ok(Some(DistanceMatrixEntry::new(row_index, col_index, distance)))
}

/// Parses every line of `reader` into a record.
///
/// `source` names the input in read errors.
///
/// # Errors
///
/// Returns [`Error::Read`] on I/O failure and [`Error::MalformedLine`] on the
/// first line that does not parse.
pub fn parse_reader<R: BufRead>(
    mut reader: R,
    source: &Path,
    options: &ParseOptions,
) -> Result<DistanceMatrixRecord> {
    let mut record = DistanceMatrixRecord::default();
    let mut line = String::new();
    let mut line_number = 0usize;

    loop {
        line.clear();
        let read = reader.read_line(&mut line).map_err(|source_err| Error::Read {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let content = line.strip_suffix('\n').unwrap_or(&line);
        match parse_line(content, options) {
            Ok(Some(entry)) => record.push(entry),
            Ok(None) => {}
            Err(fault) => {
                return Err(Error::MalformedLine {
                    line: line_number,
                    content: content.strip_suffix('\r').unwrap_or(content).to_string(),
                    fault,
                });
            }
        }
    }

    debug!(
        lines = line_number,
        entries = record.len(),
        "Parsed distance matrix"
    );
    Ok(record)
}

/// Opens and parses the file at `path`.
///
/// # Errors
///
/// Returns [`Error::InputOpen`] if the file cannot be opened, otherwise the
/// errors of [`parse_reader`].
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<DistanceMatrixRecord> {
    let file = File::open(path).map_err(|source| Error::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), strict = options.strict_fields, "Reading distance matrix");
    parse_reader(
        BufReader::with_capacity(READ_BUFFER_SIZE, file),
        path,
        options,
    )
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
