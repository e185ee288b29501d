//! Pairwise squared-Euclidean distances restricted to a feature subset.

use crate::dataset::{Dataset, FeatureSet};
use ndarray::Array2;

/// Square, symmetric `instances x instances` matrix of squared distances.
///
/// Built fresh for every subset; nothing is cached between evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    distances: Array2<f64>,
}

impl DistanceMatrix {
    /// `D[i][j] = sum over f in features of (x[i][f] - x[j][f])^2`.
    ///
    /// An empty subset yields an all-zero matrix.
    pub fn compute(features: &FeatureSet, dataset: &Dataset) -> Self {
        let n = dataset.num_instances();
        let mut distances = Array2::<f64>::zeros((n, n));

        for feature in features.iter() {
            let column = dataset.feature(feature);
            for i in 0..n {
                for j in (i + 1)..n {
                    let diff = column[i] - column[j];
                    distances[[i, j]] += diff * diff;
                }
            }
        }

        // mirror the upper triangle
        for i in 0..n {
            for j in (i + 1)..n {
                distances[[j, i]] = distances[[i, j]];
            }
        }

        Self { distances }
    }

    /// Set every `D[i][i]` to `+inf` so no instance is its own neighbor.
    pub fn exclude_self_matches(&mut self) {
        self.distances.diag_mut().fill(f64::INFINITY);
    }

    /// Index of the closest instance to `i`, lowest index on ties.
    pub fn nearest(&self, i: usize) -> usize {
        let row = self.distances.row(i);
        let mut best = 0;
        for j in 1..row.len() {
            if row[j] < row[best] {
                best = j;
            }
        }
        best
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    pub fn size(&self) -> usize {
        self.distances.nrows()
    }
}
