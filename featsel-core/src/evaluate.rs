//! Leave-one-out accuracy of a 1-nearest-neighbor classifier.

use crate::dataset::{Dataset, FeatureSet};
use crate::distance::DistanceMatrix;
use ndarray::ArrayView1;

/// Scores a feature subset. Implementations must return a value in `[0, 1]`.
pub trait SubsetEvaluator {
    fn accuracy(&self, features: &FeatureSet) -> f64;

    /// Number of features the search may choose from (`1..=num_features`).
    fn num_features(&self) -> usize;
}

/// Leave-one-out 1-NN evaluator over a borrowed dataset.
#[derive(Debug, Clone, Copy)]
pub struct LeaveOneOut<'a> {
    dataset: &'a Dataset,
}

impl<'a> LeaveOneOut<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }
}

impl SubsetEvaluator for LeaveOneOut<'_> {
    fn accuracy(&self, features: &FeatureSet) -> f64 {
        leave_one_out_accuracy(features, self.dataset, self.dataset.labels())
    }

    fn num_features(&self) -> usize {
        self.dataset.num_features()
    }
}

/// Fraction of instances whose nearest other instance shares their label.
///
/// Ties go to the lowest instance index, so an empty subset always predicts
/// from instance 0 (or instance 1 for instance 0 itself). `labels` must have
/// one entry per instance.
pub fn leave_one_out_accuracy(
    features: &FeatureSet,
    dataset: &Dataset,
    labels: ArrayView1<'_, f64>,
) -> f64 {
    let mut distances = DistanceMatrix::compute(features, dataset);
    distances.exclude_self_matches();

    let n = labels.len();
    let matches = (0..n)
        .filter(|&i| labels[distances.nearest(i)] == labels[i])
        .count();

    matches as f64 / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_two_instances_different_labels() {
        let dataset = Dataset::new(array![[0.0, 1.0], [1.0, 5.0]]).unwrap();
        let eval = LeaveOneOut::new(&dataset);
        assert_eq!(eval.accuracy(&FeatureSet::full(1)), 0.0);
        assert_eq!(eval.accuracy(&FeatureSet::new()), 0.0);
    }

    #[test]
    fn test_two_instances_same_label() {
        let dataset = Dataset::new(array![[2.0, 1.0], [2.0, 5.0]]).unwrap();
        let eval = LeaveOneOut::new(&dataset);
        assert_eq!(eval.accuracy(&FeatureSet::full(1)), 1.0);
    }

    #[test]
    fn test_separating_feature_is_perfect() {
        let dataset = Dataset::new(array![
            [1.0, 0.0, 7.0],
            [1.0, 0.1, 1.0],
            [2.0, 5.0, 6.9],
            [2.0, 5.1, 1.1],
        ])
        .unwrap();
        let eval = LeaveOneOut::new(&dataset);
        assert_eq!(eval.accuracy(&FeatureSet::from(vec![1])), 1.0);
        assert_eq!(eval.accuracy(&FeatureSet::from(vec![2])), 0.0);
    }

    #[test]
    fn test_empty_subset_uses_lowest_index_neighbor() {
        // every instance except 0 is predicted from instance 0, instance 0 from 1
        let dataset = Dataset::new(array![
            [1.0, 0.0],
            [1.0, 9.0],
            [2.0, 3.0],
            [1.0, 4.0],
        ])
        .unwrap();
        let acc = LeaveOneOut::new(&dataset).accuracy(&FeatureSet::new());
        assert_eq!(acc, 0.75);
    }

    #[test]
    fn test_empty_subset_is_reproducible() {
        let dataset = Dataset::new(array![[1.0, 0.3], [2.0, 0.1], [2.0, 0.2]]).unwrap();
        let eval = LeaveOneOut::new(&dataset);
        let first = eval.accuracy(&FeatureSet::new());
        for _ in 0..5 {
            assert_eq!(eval.accuracy(&FeatureSet::new()), first);
        }
    }

    #[test]
    fn test_single_instance_predicts_itself() {
        let dataset = Dataset::new(array![[3.0, 1.0]]).unwrap();
        assert_eq!(LeaveOneOut::new(&dataset).accuracy(&FeatureSet::full(1)), 1.0);
    }
}
