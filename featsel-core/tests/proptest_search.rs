//! Property-based tests for evaluation and search using proptest.

use proptest::prelude::*;

use featsel_core::{
    BackwardEliminator, Dataset, DistanceMatrix, FeatureSearch, FeatureSet, ForwardSelector,
    LeaveOneOut, SilentReporter, SubsetEvaluator,
};

/// Datasets with 2..12 instances, 1..5 features, labels drawn from 0..3.
fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (2usize..12, 1usize..5).prop_flat_map(|(rows, features)| {
        prop::collection::vec(
            (0u8..3, prop::collection::vec(-50.0f64..50.0, features)),
            rows,
        )
        .prop_map(|rows| {
            let rows = rows
                .into_iter()
                .map(|(label, values)| {
                    let mut row = vec![label as f64];
                    row.extend(values);
                    row
                })
                .collect();
            Dataset::from_rows(rows).unwrap()
        })
    })
}

/// A dataset paired with an arbitrary subset of its features.
fn dataset_and_subset() -> impl Strategy<Value = (Dataset, FeatureSet)> {
    dataset_strategy().prop_flat_map(|dataset| {
        let n = dataset.num_features();
        prop::collection::vec(any::<bool>(), n).prop_map(move |mask| {
            let subset: FeatureSet = mask
                .iter()
                .enumerate()
                .filter(|(_, keep)| **keep)
                .map(|(i, _)| i + 1)
                .collect();
            (dataset.clone(), subset)
        })
    })
}

// --- Evaluation properties ---

proptest! {
    #[test]
    fn accuracy_is_a_fraction((dataset, subset) in dataset_and_subset()) {
        let acc = LeaveOneOut::new(&dataset).accuracy(&subset);
        prop_assert!((0.0..=1.0).contains(&acc));
    }

    #[test]
    fn accuracy_is_deterministic((dataset, subset) in dataset_and_subset()) {
        let eval = LeaveOneOut::new(&dataset);
        prop_assert_eq!(eval.accuracy(&subset), eval.accuracy(&subset));
    }

    #[test]
    fn distance_matrix_is_symmetric((dataset, subset) in dataset_and_subset()) {
        let mut d = DistanceMatrix::compute(&subset, &dataset);
        d.exclude_self_matches();
        for i in 0..d.size() {
            prop_assert_eq!(d.get(i, i), f64::INFINITY);
            for j in 0..d.size() {
                prop_assert_eq!(d.get(i, j), d.get(j, i));
                if i != j {
                    prop_assert!(d.get(i, j) >= 0.0);
                }
            }
        }
    }
}

// --- Search properties ---

proptest! {
    #[test]
    fn forward_grows_by_one_and_best_never_drops(dataset in dataset_strategy()) {
        let n = dataset.num_features();
        let mut search = ForwardSelector::new(LeaveOneOut::new(&dataset), SilentReporter);
        let mut best_history = Vec::new();
        let mut sizes = Vec::new();
        while let Some(record) = search.next() {
            sizes.push(record.features.len());
            best_history.push(search.best().1);
        }

        prop_assert_eq!(sizes, (0..=n).collect::<Vec<_>>());
        prop_assert!(best_history.windows(2).all(|w| w[0] <= w[1]));
        let mut chosen = search.selected().as_slice().to_vec();
        chosen.sort_unstable();
        prop_assert_eq!(chosen, (1..=n).collect::<Vec<_>>());
    }

    #[test]
    fn backward_shrinks_by_one_and_best_never_drops(dataset in dataset_strategy()) {
        let n = dataset.num_features();
        let mut search = BackwardEliminator::new(LeaveOneOut::new(&dataset), SilentReporter);
        let mut best_history = Vec::new();
        let mut sizes = Vec::new();
        while let Some(record) = search.next() {
            sizes.push(record.features.len());
            best_history.push(search.best().1);
        }

        prop_assert_eq!(sizes, (0..=n).rev().collect::<Vec<_>>());
        prop_assert!(best_history.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(search.selected().is_empty());
    }

    #[test]
    fn best_accuracy_matches_reevaluation(dataset in dataset_strategy()) {
        let eval = LeaveOneOut::new(&dataset);
        let mut search = ForwardSelector::new(eval, SilentReporter);
        search.by_ref().for_each(drop);
        let (best, acc) = search.best();
        if !best.is_empty() {
            prop_assert_eq!(eval.accuracy(best), acc);
        }
    }
}

// --- Separating feature among noise ---

proptest! {
    #[test]
    fn forward_finds_perfect_separator(
        noise in prop::collection::vec(prop::collection::vec(0.0f64..1.0, 8), 0..4),
    ) {
        // feature 1 puts class 0 near 0 and class 1 near 100; the rest is noise in [0, 1)
        let rows = (0..8)
            .map(|i| {
                let label = (i % 2) as f64;
                let mut row = vec![label, label * 100.0 + i as f64 * 0.01];
                row.extend(noise.iter().map(|column| column[i]));
                row
            })
            .collect();
        let dataset = Dataset::from_rows(rows).unwrap();

        let mut search = ForwardSelector::new(LeaveOneOut::new(&dataset), SilentReporter);
        search.by_ref().for_each(drop);
        let (best, acc) = search.best();
        prop_assert_eq!(best, &FeatureSet::from(vec![1]));
        prop_assert_eq!(acc, 1.0);
    }
}
