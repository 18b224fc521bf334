//! Tests for `converter` module

use super::*;
use crate::error::{Error, LineFault};
use crate::storage::{load_record, OutputFormat};
use std::fs;
use tempfile::{tempdir, TempDir};

fn converter_for(dir: &TempDir, input: &str) -> MatrixConverter {
    let input_path = dir.path().join("elki_distance_matrix.txt");
    fs::write(&input_path, input).unwrap();

    let mut config = ConverterConfig::default();
    config.input.path = input_path;
    config.output.path = dir.path().join("matrix.p");
    MatrixConverter::new(config)
}

#[test]
fn test_convert_scenario() {
    // Arrange
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.p");
    fs::write(&input, "0 1 0.5\n1 2 0.75\n0 2 1.0\n").unwrap();

    // Act
    let stats = convert(&input, &output).unwrap();

    // Assert
    assert_eq!(stats.entries, 3);
    assert_eq!(stats.output, output);
    let record = load_record(&output).unwrap();
    assert_eq!(record.row_indices(), &[0, 1, 0]);
    assert_eq!(record.col_indices(), &[1, 2, 2]);
    assert_eq!(record.distances(), &[0.5, 0.75, 1.0]);
}

#[test]
fn test_run_reports_bytes_written() {
    let dir = tempdir().unwrap();
    let converter = converter_for(&dir, "0 1 0.5\n");

    let stats = converter.run().unwrap();

    let on_disk = fs::metadata(&converter.config().output.path).unwrap().len();
    assert_eq!(stats.bytes_written, on_disk);
}

#[test]
fn test_malformed_input_writes_nothing() {
    // Arrange
    let dir = tempdir().unwrap();
    let converter = converter_for(&dir, "0 1 0.5\n0 1 abc\n");

    // Act
    let err = converter.run().unwrap_err();

    // Assert
    assert!(matches!(
        err.line_fault(),
        Some(LineFault::InvalidDistance(_))
    ));
    assert!(!converter.config().output.path.exists());
}

#[test]
fn test_malformed_input_keeps_previous_output() {
    let dir = tempdir().unwrap();
    let converter = converter_for(&dir, "0 1 0.5\n");
    converter.run().unwrap();
    fs::write(&converter.config().input.path, "0 1\n").unwrap();

    assert!(converter.run().is_err());

    assert_eq!(load_record(&converter.config().output.path).unwrap().len(), 1);
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    let output = dir.path().join("out.p");

    let err = convert(&missing, &output).unwrap_err();

    assert!(matches!(err, Error::InputOpen { .. }));
    assert!(!output.exists());
}

#[test]
fn test_strict_fields_from_config() {
    let dir = tempdir().unwrap();
    let mut converter = converter_for(&dir, "0 1 0.5 trailing\n");
    assert_eq!(converter.run().unwrap().entries, 1);

    converter.config.input.strict_fields = true;
    let err = converter.run().unwrap_err();

    assert_eq!(err.line_fault(), Some(&LineFault::ExtraFields { found: 4 }));
}

#[test]
fn test_json_output_from_config() {
    let dir = tempdir().unwrap();
    let mut converter = converter_for(&dir, "5 6 0.25\n6 5 0.25\n");
    converter.config.output.format = OutputFormat::Json;

    converter.run().unwrap();

    let text = fs::read_to_string(&converter.config().output.path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["texts1"], serde_json::json!([5, 6]));
    assert_eq!(value["NVS"], serde_json::json!([0.25, 0.25]));
}

#[test]
fn test_read_then_write() {
    let dir = tempdir().unwrap();
    let converter = converter_for(&dir, "1 1 0.0\n");

    let record = converter.read().unwrap();
    converter.write(&record).unwrap();

    assert_eq!(load_record(&converter.config().output.path).unwrap(), record);
}

#[test]
fn test_run_with_calls_hook_before_output_exists() {
    // Arrange
    let dir = tempdir().unwrap();
    let converter = converter_for(&dir, "0 1 0.5\n1 0 0.5\n");
    let output = converter.config().output.path.clone();
    let mut seen = None;

    // Act
    let stats = converter
        .run_with(|record| seen = Some((record.len(), output.exists())))
        .unwrap();

    // Assert
    assert_eq!(seen, Some((2, false)));
    assert_eq!(stats.entries, 2);
    assert!(output.exists());
}

#[test]
fn test_run_with_skips_hook_on_malformed_input() {
    let dir = tempdir().unwrap();
    let converter = converter_for(&dir, "0 1 nope\n");
    let mut called = false;

    assert!(converter.run_with(|_| called = true).is_err());

    assert!(!called);
}
