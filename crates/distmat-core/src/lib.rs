//! # distmat
//!
//! Converts an ELKI pairwise distance matrix, one `row col distance` triple
//! per line, into a persisted record of three positionally aligned columns:
//! `texts1` (row indices), `texts2` (column indices) and `NVS` (distances).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let stats = distmat_core::convert(
//!     Path::new("20NG/elki_distance_matrix.txt"),
//!     Path::new("20ng_entity_graph_with_tfidf_NVS.p"),
//! )?;
//! println!("{} entries", stats.entries);
//!
//! let record = distmat_core::load_record(Path::new("20ng_entity_graph_with_tfidf_NVS.p"))?;
//! assert_eq!(record.len(), stats.entries);
//! # Ok::<(), distmat_core::Error>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod converter;
pub mod error;
pub mod parser;
pub mod record;
pub mod storage;

pub use config::{ConfigError, ConverterConfig, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
pub use converter::{convert, ConversionStats, MatrixConverter};
pub use error::{Error, LineFault, Result};
pub use parser::{parse_file, parse_line, parse_reader, ParseOptions};
pub use record::{DistanceMatrixEntry, DistanceMatrixRecord, RecordSummary};
pub use storage::{
    decode_record, encode_record, load_record, save_record, OutputFormat, OutputOptions,
};
