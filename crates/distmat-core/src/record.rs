//! The distance matrix record: three positionally aligned columns.
//!
//! Element `k` of each column comes from input line `k`. There is no key
//! structure on top of that: duplicate `(row, col)` pairs and asymmetric
//! pairs are kept exactly as they appear.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrixEntry {
    /// First identifier on the line.
    pub row_index: i64,
    /// Second identifier on the line.
    pub col_index: i64,
    /// Third field on the line.
    pub distance: f64,
}

impl DistanceMatrixEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(row_index: i64, col_index: i64, distance: f64) -> Self {
        Self {
            row_index,
            col_index,
            distance,
        }
    }
}

/// The persisted artifact.
///
/// Serialized as a mapping with the keys `texts1`, `texts2` and `NVS`.
/// Deserialization rejects columns of unequal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColumns")]
pub struct DistanceMatrixRecord {
    #[serde(rename = "texts1")]
    row_indices: Vec<i64>,
    #[serde(rename = "texts2")]
    col_indices: Vec<i64>,
    #[serde(rename = "NVS")]
    distances: Vec<f64>,
}

#[derive(Deserialize)]
struct RawColumns {
    texts1: Vec<i64>,
    texts2: Vec<i64>,
    #[serde(rename = "NVS")]
    nvs: Vec<f64>,
}

impl TryFrom<RawColumns> for DistanceMatrixRecord {
    type Error = Error;

    fn try_from(raw: RawColumns) -> Result<Self> {
        Self::from_columns(raw.texts1, raw.texts2, raw.nvs)
    }
}

impl DistanceMatrixRecord {
    /// Builds a record from three columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MisalignedColumns`] if the columns differ in length.
    pub fn from_columns(
        row_indices: Vec<i64>,
        col_indices: Vec<i64>,
        distances: Vec<f64>,
    ) -> Result<Self> {
        if row_indices.len() != col_indices.len() || row_indices.len() != distances.len() {
            return Err(Error::MisalignedColumns {
                rows: row_indices.len(),
                cols: col_indices.len(),
                distances: distances.len(),
            });
        }
        Ok(Self {
            row_indices,
            col_indices,
            distances,
        })
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            row_indices: Vec::with_capacity(capacity),
            col_indices: Vec::with_capacity(capacity),
            distances: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, entry: DistanceMatrixEntry) {
        self.row_indices.push(entry.row_index);
        self.col_indices.push(entry.col_index);
        self.distances.push(entry.distance);
    }

    /// Row indices in input order.
    #[must_use]
    pub fn row_indices(&self) -> &[i64] {
        &self.row_indices
    }

    /// Column indices in input order.
    #[must_use]
    pub fn col_indices(&self) -> &[i64] {
        &self.col_indices
    }

    /// Distances in input order.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.row_indices.len()
    }

    /// Returns true if the record holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_indices.is_empty()
    }

    /// Returns the entry at position `k`.
    #[must_use]
    pub fn get(&self, k: usize) -> Option<DistanceMatrixEntry> {
        Some(DistanceMatrixEntry::new(
            *self.row_indices.get(k)?,
            *self.col_indices.get(k)?,
            *self.distances.get(k)?,
        ))
    }

    /// Iterates entries in positional order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = DistanceMatrixEntry> + '_ {
        self.row_indices
            .iter()
            .zip(&self.col_indices)
            .zip(&self.distances)
            .map(|((&row, &col), &distance)| DistanceMatrixEntry::new(row, col, distance))
    }

    /// Splits the record back into its columns.
    #[must_use]
    pub fn into_columns(self) -> (Vec<i64>, Vec<i64>, Vec<f64>) {
        (self.row_indices, self.col_indices, self.distances)
    }

    /// Computes descriptive statistics over the record.
    #[must_use]
    pub fn summary(&self) -> RecordSummary {
        let distinct_rows = self.row_indices.iter().collect::<HashSet<_>>().len();
        let distinct_cols = self.col_indices.iter().collect::<HashSet<_>>().len();

        let mut pairs = HashSet::with_capacity(self.len());
        let duplicate_pairs = self
            .row_indices
            .iter()
            .zip(&self.col_indices)
            .filter(|pair| !pairs.insert(*pair))
            .count();

        let mut measured = self.distances.iter().copied().filter(|d| !d.is_nan());
        let (min_distance, max_distance) = match measured.next() {
            Some(first) => {
                let (min, max) =
                    measured.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
                (Some(min), Some(max))
            }
            None => (None, None),
        };

        RecordSummary {
            entries: self.len(),
            distinct_rows,
            distinct_cols,
            duplicate_pairs,
            nan_distances: self.distances.iter().filter(|d| d.is_nan()).count(),
            min_distance,
            max_distance,
        }
    }
}

impl FromIterator<DistanceMatrixEntry> for DistanceMatrixRecord {
    fn from_iter<I: IntoIterator<Item = DistanceMatrixEntry>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut record = Self::with_capacity(iter.size_hint().0);
        for entry in iter {
            record.push(entry);
        }
        record
    }
}

/// Descriptive statistics of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    /// Number of entries.
    pub entries: usize,
    /// Number of distinct row indices.
    pub distinct_rows: usize,
    /// Number of distinct column indices.
    pub distinct_cols: usize,
    /// Entries whose `(row, col)` pair already appeared earlier.
    pub duplicate_pairs: usize,
    /// Entries with a NaN distance.
    pub nan_distances: usize,
    /// Smallest non-NaN distance.
    pub min_distance: Option<f64>,
    /// Largest non-NaN distance.
    pub max_distance: Option<f64>,
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
