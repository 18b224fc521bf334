//! Tests for `error` module

use super::*;

fn parse_int_error() -> ParseIntError {
    "x".parse::<i64>().unwrap_err()
}

#[test]
fn test_error_codes_are_unique() {
    // Arrange
    let errors: Vec<Error> = vec![
        Error::InputOpen {
            path: PathBuf::from("in.txt"),
            source: std::io::Error::other("test"),
        },
        Error::Read {
            path: PathBuf::from("in.txt"),
            source: std::io::Error::other("test"),
        },
        Error::MalformedLine {
            line: 1,
            content: "x".into(),
            fault: LineFault::MissingFields { found: 1 },
        },
        Error::Write {
            path: PathBuf::from("out.p"),
            source: std::io::Error::other("test"),
        },
        Error::Serialization("test".into()),
        Error::CorruptedRecord("test".into()),
        Error::MisalignedColumns {
            rows: 1,
            cols: 2,
            distances: 3,
        },
        Error::Config("test".into()),
    ];

    // Act
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");
    for code in &codes {
        assert!(code.starts_with("DISTMAT-"), "Code {code} should start with DISTMAT-");
    }
}

#[test]
fn test_error_display_includes_code() {
    // Arrange
    let err = Error::CorruptedRecord("bad magic".into());

    // Act
    let display = format!("{err}");

    // Assert
    assert!(display.starts_with("[DISTMAT-006]"));
    assert!(display.contains("bad magic"));
}

#[test]
fn test_malformed_line_display_names_line_and_fault() {
    // Arrange
    let err = Error::MalformedLine {
        line: 7,
        content: "0 x 1.0".into(),
        fault: LineFault::InvalidColIndex(parse_int_error()),
    };

    // Act
    let display = err.to_string();

    // Assert
    assert!(display.contains("line 7"), "{display}");
    assert!(display.contains("\"0 x 1.0\""), "{display}");
    assert!(display.contains("invalid column index"), "{display}");
}

#[test]
fn test_line_fault_accessor() {
    let err = Error::MalformedLine {
        line: 1,
        content: "1 2".into(),
        fault: LineFault::MissingFields { found: 2 },
    };
    assert_eq!(err.line_fault(), Some(&LineFault::MissingFields { found: 2 }));
    assert!(Error::Config("x".into()).line_fault().is_none());
}

#[test]
fn test_io_errors_keep_source() {
    use std::error::Error as _;

    let err = Error::Write {
        path: PathBuf::from("/nope/out.p"),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };

    assert!(err.source().is_some());
    assert!(err.to_string().contains("/nope/out.p"));
}

#[test]
fn test_config_error_converts() {
    let err: Error = crate::config::ConfigError::ParseError("boom".into()).into();
    assert_eq!(err.code(), "DISTMAT-008");
    assert!(err.to_string().contains("boom"));
}
