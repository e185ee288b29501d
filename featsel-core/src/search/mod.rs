//! Greedy feature-subset search.
//!
//! Both strategies are iterators over [`StepRecord`]s: the first record is the
//! starting subset, every later record is one committed add/remove. The
//! search always runs until no feature is left to add or remove, and keeps
//! the best subset seen along the way (strict improvement only), so a dip at
//! one step never hides a better subset found later.
//!
//! ```no_run
//! use featsel_core::{Dataset, LeaveOneOut, MemorySink, SearchKind, SilentReporter, run_search};
//!
//! let dataset = Dataset::load("data.txt")?;
//! let mut sink = MemorySink::default();
//! let outcome = run_search(
//!     SearchKind::Forward,
//!     LeaveOneOut::new(&dataset),
//!     &mut SilentReporter,
//!     &mut sink,
//! )?;
//! println!("best {} at {:.3}", outcome.best_features, outcome.best_accuracy);
//! # Ok::<(), featsel_core::SelectionError>(())
//! ```

pub mod backward;
pub mod forward;

pub use backward::BackwardEliminator;
pub use forward::ForwardSelector;

use crate::dataset::{FeatureIndex, FeatureSet};
use crate::error::{Result, SelectionError};
use crate::evaluate::SubsetEvaluator;
use crate::report::SearchReporter;
use crate::sink::ResultSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Which greedy strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    /// Start empty, add the best feature each step.
    Forward,
    /// Start full, remove the feature whose removal scores best each step.
    Backward,
}

impl SearchKind {
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Forward => "Forward Selection",
            SearchKind::Backward => "Backward Elimination",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the menu numbers `1`/`2` as well as the strategy names.
impl FromStr for SearchKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "forward" | "f" => Ok(SearchKind::Forward),
            "2" | "backward" | "b" => Ok(SearchKind::Backward),
            other => Err(SelectionError::invalid_choice(format!(
                "'{other}', please select 1 or 2."
            ))),
        }
    }
}

/// Feature change committed by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepChange {
    Added(FeatureIndex),
    Removed(FeatureIndex),
}

/// One row of search output: the subset after a step and its accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 0 for the starting subset, then 1, 2, ...
    pub step: usize,
    pub features: FeatureSet,
    pub accuracy: f64,
    /// `None` for the starting subset.
    pub change: Option<StepChange>,
}

/// Final result of a search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub kind: SearchKind,
    pub best_features: FeatureSet,
    pub best_accuracy: f64,
    /// Accuracy of the full feature set, for reference only.
    pub baseline_accuracy: f64,
    /// Records produced, including the starting subset.
    pub steps: usize,
    pub elapsed_secs: f64,
}

/// A greedy search in progress. Exhausting the iterator completes the search.
pub trait FeatureSearch: Iterator<Item = StepRecord> {
    fn kind(&self) -> SearchKind;

    /// Best subset and accuracy so far; final once the iterator is exhausted.
    fn best(&self) -> (&FeatureSet, f64);

    /// Full-feature-set accuracy, once the first record has been produced.
    fn baseline_accuracy(&self) -> Option<f64>;
}

/// Best-ever accumulator, updated only on strict improvement.
#[derive(Debug, Clone, Default)]
pub(crate) struct BestSoFar {
    pub features: FeatureSet,
    pub accuracy: f64,
}

impl BestSoFar {
    pub fn new(features: FeatureSet, accuracy: f64) -> Self {
        Self { features, accuracy }
    }

    /// Replace the best if `accuracy` is strictly higher. Returns whether it did.
    pub fn offer(&mut self, features: &FeatureSet, accuracy: f64) -> bool {
        if accuracy > self.accuracy {
            self.features = features.clone();
            self.accuracy = accuracy;
            true
        } else {
            false
        }
    }
}

/// Score each candidate's subset and keep the first one with the highest
/// accuracy (strictly greater replaces). `None` only if there are no candidates.
pub(crate) fn pick_best<E, R>(
    evaluator: &E,
    reporter: &mut R,
    candidates: &[FeatureIndex],
    subset_for: impl Fn(FeatureIndex) -> FeatureSet,
) -> Option<(FeatureIndex, f64)>
where
    E: SubsetEvaluator,
    R: SearchReporter,
{
    let mut best: Option<(FeatureIndex, f64)> = None;
    for &feature in candidates {
        let subset = subset_for(feature);
        let accuracy = evaluator.accuracy(&subset);
        reporter.report_candidate(&subset, accuracy);

        if best.is_none_or(|(_, top)| accuracy > top) {
            best = Some((feature, accuracy));
        }
    }
    best
}

/// Run a search to completion, streaming each record into `sink`.
pub fn run_search<E, R, S>(
    kind: SearchKind,
    evaluator: E,
    reporter: &mut R,
    sink: &mut S,
) -> Result<SearchOutcome>
where
    E: SubsetEvaluator,
    R: SearchReporter + ?Sized,
    S: ResultSink + ?Sized,
{
    let started = Instant::now();
    let mut outcome = match kind {
        SearchKind::Forward => drain(ForwardSelector::new(evaluator, &mut *reporter), sink)?,
        SearchKind::Backward => drain(BackwardEliminator::new(evaluator, &mut *reporter), sink)?,
    };
    outcome.elapsed_secs = started.elapsed().as_secs_f64();
    reporter.report_final(&outcome);
    Ok(outcome)
}

fn drain<F, S>(mut search: F, sink: &mut S) -> Result<SearchOutcome>
where
    F: FeatureSearch,
    S: ResultSink + ?Sized,
{
    let mut steps = 0;
    for record in search.by_ref() {
        sink.record(&record)?;
        steps += 1;
    }
    sink.finish()?;

    let (best_features, best_accuracy) = search.best();
    Ok(SearchOutcome {
        kind: search.kind(),
        best_features: best_features.clone(),
        best_accuracy,
        baseline_accuracy: search.baseline_accuracy().unwrap_or_default(),
        steps,
        elapsed_secs: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kind_from_str() {
        assert_eq!("1".parse::<SearchKind>().unwrap(), SearchKind::Forward);
        assert_eq!(" 2 ".parse::<SearchKind>().unwrap(), SearchKind::Backward);
        assert_eq!("Backward".parse::<SearchKind>().unwrap(), SearchKind::Backward);
        assert_eq!("forward".parse::<SearchKind>().unwrap(), SearchKind::Forward);
    }

    #[test]
    fn test_search_kind_rejects_other_input() {
        for input in ["0", "3", "", "sideways", "1.0"] {
            let err = input.parse::<SearchKind>().unwrap_err();
            assert!(matches!(err, SelectionError::InvalidChoice(_)), "{input}");
        }
    }

    #[test]
    fn test_best_so_far_strict_improvement() {
        let mut best = BestSoFar::default();
        assert!(!best.offer(&FeatureSet::from(vec![1]), 0.0));
        assert!(best.features.is_empty());

        assert!(best.offer(&FeatureSet::from(vec![1]), 0.5));
        assert!(!best.offer(&FeatureSet::from(vec![1, 2]), 0.5));
        assert_eq!(best.features, FeatureSet::from(vec![1]));

        assert!(!best.offer(&FeatureSet::from(vec![1, 2, 3]), 0.25));
        assert_eq!(best.accuracy, 0.5);
    }

    #[test]
    fn test_search_kind_serde() {
        let json = serde_json::to_string(&SearchKind::Backward).unwrap();
        assert_eq!(json, "\"backward\"");
    }
}
