//! Labeled numeric datasets and feature subsets.
//!
//! A dataset is an `instances x (1 + features)` matrix. Column 0 holds the
//! class label, columns `1..=features` hold real-valued features. Feature
//! indices are 1-based so they address dataset columns directly.

use crate::error::{Result, SelectionError};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 1-based index of a feature column.
pub type FeatureIndex = usize;

/// An ordered set of unique feature indices.
///
/// Order is insertion order and only matters for display; membership is what
/// the search cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FeatureIndex>", into = "Vec<FeatureIndex>")]
pub struct FeatureSet(Vec<FeatureIndex>);

impl FeatureSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// All features `1..=count` in ascending order.
    pub fn full(count: usize) -> Self {
        Self((1..=count).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, feature: FeatureIndex) -> bool {
        self.0.contains(&feature)
    }

    /// Append `feature` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, feature: FeatureIndex) -> bool {
        if self.contains(feature) {
            return false;
        }
        self.0.push(feature);
        true
    }

    /// Remove `feature`, keeping the order of the remaining members.
    pub fn remove(&mut self, feature: FeatureIndex) -> bool {
        match self.0.iter().position(|&f| f == feature) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    /// A copy of this set with `feature` appended.
    pub fn with(&self, feature: FeatureIndex) -> Self {
        let mut next = self.clone();
        next.insert(feature);
        next
    }

    /// A copy of this set with `feature` removed.
    pub fn without(&self, feature: FeatureIndex) -> Self {
        let mut next = self.clone();
        next.remove(feature);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = FeatureIndex> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[FeatureIndex] {
        &self.0
    }
}

impl FromIterator<FeatureIndex> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = FeatureIndex>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for feature in iter {
            set.insert(feature);
        }
        set
    }
}

impl From<Vec<FeatureIndex>> for FeatureSet {
    fn from(features: Vec<FeatureIndex>) -> Self {
        features.into_iter().collect()
    }
}

impl From<FeatureSet> for Vec<FeatureIndex> {
    fn from(set: FeatureSet) -> Self {
        set.0
    }
}

/// Renders as `{1, 2, 3}` (and `{}` when empty).
impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, feature) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{feature}")?;
        }
        f.write_str("}")
    }
}

/// A labeled numeric dataset, immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    data: Array2<f64>,
}

impl Dataset {
    /// Wrap a matrix whose first column is the class label.
    pub fn new(data: Array2<f64>) -> Result<Self> {
        if data.nrows() == 0 {
            return Err(SelectionError::EmptyDataset);
        }
        if data.ncols() == 0 {
            return Err(SelectionError::malformed(1, "row has no class label column"));
        }
        Ok(Self { data })
    }

    /// Build a dataset from row vectors, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(SelectionError::EmptyDataset);
        };
        let width = first.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SelectionError::RaggedRow {
                    line: i + 1,
                    expected: width,
                    found: row.len(),
                });
            }
        }
        let height = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| SelectionError::malformed(1, e.to_string()))?;
        Self::new(data)
    }

    /// Load a whitespace-delimited numeric text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SelectionError::DatasetOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            instances = dataset.num_instances(),
            features = dataset.num_features(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse whitespace-delimited rows. Blank lines and `#` comments are skipped.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut width: Option<usize> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let row = content
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| {
                        SelectionError::malformed(
                            line_no,
                            format!("could not parse '{token}' as a number"),
                        )
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(SelectionError::RaggedRow {
                        line: line_no,
                        expected,
                        found: row.len(),
                    });
                }
                Some(_) => {}
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    pub fn num_instances(&self) -> usize {
        self.data.nrows()
    }

    /// Number of feature columns, excluding the class label.
    pub fn num_features(&self) -> usize {
        self.data.ncols() - 1
    }

    /// The class label column.
    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.data.column(0)
    }

    /// Values of one feature column. Panics if `feature` is outside `1..=num_features`.
    pub fn feature(&self, feature: FeatureIndex) -> ArrayView1<'_, f64> {
        assert!(
            (1..=self.num_features()).contains(&feature),
            "feature index {feature} out of range 1..={}",
            self.num_features()
        );
        self.data.index_axis(Axis(1), feature)
    }
}
