//! Backward elimination: start from every feature and remove one per step.

use super::{BestSoFar, FeatureSearch, SearchKind, StepChange, StepRecord, pick_best};
use crate::dataset::FeatureSet;
use crate::evaluate::SubsetEvaluator;
use crate::report::SearchReporter;

/// Greedy backward elimination.
///
/// The first record is the full subset, which also seeds the best-ever
/// result. Each later record drops the feature whose removal scores highest,
/// scanning the current subset in order, until the subset is empty.
pub struct BackwardEliminator<E, R> {
    evaluator: E,
    reporter: R,
    selected: FeatureSet,
    best: BestSoFar,
    baseline: Option<f64>,
    step: usize,
}

impl<E, R> BackwardEliminator<E, R>
where
    E: SubsetEvaluator,
    R: SearchReporter,
{
    pub fn new(evaluator: E, reporter: R) -> Self {
        let selected = FeatureSet::full(evaluator.num_features());
        Self {
            evaluator,
            reporter,
            selected,
            best: BestSoFar::default(),
            baseline: None,
            step: 0,
        }
    }

    /// Features still in the subset.
    pub fn selected(&self) -> &FeatureSet {
        &self.selected
    }

    fn start(&mut self) -> StepRecord {
        let accuracy = self.evaluator.accuracy(&self.selected);
        self.reporter.report_baseline(&self.selected, accuracy);
        self.baseline = Some(accuracy);
        self.best = BestSoFar::new(self.selected.clone(), accuracy);

        let record = StepRecord {
            step: 0,
            features: self.selected.clone(),
            accuracy,
            change: None,
        };
        self.reporter.report_step(&record, self.evaluator.num_features());
        record
    }

    fn advance(&mut self) -> Option<StepRecord> {
        let selected = &self.selected;
        let (feature, accuracy) = pick_best(
            &self.evaluator,
            &mut self.reporter,
            selected.as_slice(),
            |f| selected.without(f),
        )?;

        self.selected.remove(feature);
        self.step += 1;

        let record = StepRecord {
            step: self.step,
            features: self.selected.clone(),
            accuracy,
            change: Some(StepChange::Removed(feature)),
        };
        self.reporter.report_step(&record, self.evaluator.num_features());
        if !self.best.offer(&self.selected, accuracy) {
            self.reporter.report_warning(&record, self.best.accuracy);
        }
        Some(record)
    }
}

impl<E, R> Iterator for BackwardEliminator<E, R>
where
    E: SubsetEvaluator,
    R: SearchReporter,
{
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        if self.baseline.is_none() {
            return Some(self.start());
        }
        self.advance()
    }
}

impl<E, R> FeatureSearch for BackwardEliminator<E, R>
where
    E: SubsetEvaluator,
    R: SearchReporter,
{
    fn kind(&self) -> SearchKind {
        SearchKind::Backward
    }

    fn best(&self) -> (&FeatureSet, f64) {
        (&self.best.features, self.best.accuracy)
    }

    fn baseline_accuracy(&self) -> Option<f64> {
        self.baseline
    }
}
