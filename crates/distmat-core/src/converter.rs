//! Text matrix to record conversion.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::parser::parse_file;
use crate::record::DistanceMatrixRecord;
use crate::storage::save_record;

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    /// Entries written.
    pub entries: usize,
    /// Size of the output file.
    pub bytes_written: u64,
    /// Input path.
    pub input: PathBuf,
    /// Output path.
    pub output: PathBuf,
}

/// Reads an ELKI distance matrix and writes it as a record.
///
/// The whole input is parsed before the output is touched, so a malformed
/// line leaves no output file behind.
#[derive(Debug, Clone, Default)]
pub struct MatrixConverter {
    config: ConverterConfig,
}

impl MatrixConverter {
    /// Creates a converter for the given configuration.
    #[must_use]
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Parses the configured input file.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be opened or read, or on the first
    /// malformed line.
    pub fn read(&self) -> Result<DistanceMatrixRecord> {
        parse_file(&self.config.input.path, &self.config.parse_options())
    }

    /// Writes `record` to the configured output path.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write(&self, record: &DistanceMatrixRecord) -> Result<u64> {
        save_record(
            record,
            &self.config.output.path,
            &self.config.output_options(),
        )
    }

    /// Reads the input, then writes the record.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`Self::read`] or [`Self::write`].
    pub fn run(&self) -> Result<ConversionStats> {
        self.run_with(|_| {})
    }

    /// Like [`Self::run`], calling `before_write` once the whole input has
    /// parsed and before the output file is touched.
    ///
    /// `before_write` is not called when the input fails to parse.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`Self::read`] or [`Self::write`].
    pub fn run_with<F>(&self, before_write: F) -> Result<ConversionStats>
    where
        F: FnOnce(&DistanceMatrixRecord),
    {
        let start = Instant::now();
        let record = self.read()?;
        debug!(
            entries = record.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Input parsed"
        );

        before_write(&record);
        info!(path = %self.config.output.path.display(), "Writing record file");
        let bytes_written = self.write(&record)?;

        info!(
            entries = record.len(),
            bytes = bytes_written,
            elapsed_ms = start.elapsed().as_millis(),
            "Conversion complete"
        );
        Ok(ConversionStats {
            entries: record.len(),
            bytes_written,
            input: self.config.input.path.clone(),
            output: self.config.output.path.clone(),
        })
    }
}

/// Converts `input_path` to a record at `output_path` with default options.
///
/// # Errors
///
/// See [`MatrixConverter::run`].
pub fn convert(input_path: &Path, output_path: &Path) -> Result<ConversionStats> {
    let mut config = ConverterConfig::default();
    config.input.path = input_path.to_path_buf();
    config.output.path = output_path.to_path_buf();
    MatrixConverter::new(config).run()
}

#[cfg(test)]
#[path = "converter_tests.rs"]
mod tests;
