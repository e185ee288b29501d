//! Forward selection: start from no features and add one per step.

use super::{BestSoFar, FeatureSearch, SearchKind, StepChange, StepRecord, pick_best};
use crate::dataset::{FeatureIndex, FeatureSet};
use crate::evaluate::SubsetEvaluator;
use crate::report::SearchReporter;

/// Greedy forward selection.
///
/// The first record is the empty subset. Each later record adds the
/// candidate whose inclusion scores highest (lowest index on ties) until
/// every feature has been added. The best-ever subset starts as `{}` at
/// accuracy 0 and the empty-subset record does not count towards it.
pub struct ForwardSelector<E, R> {
    evaluator: E,
    reporter: R,
    selected: FeatureSet,
    remaining: Vec<FeatureIndex>,
    best: BestSoFar,
    baseline: Option<f64>,
    step: usize,
}

impl<E, R> ForwardSelector<E, R>
where
    E: SubsetEvaluator,
    R: SearchReporter,
{
    pub fn new(evaluator: E, reporter: R) -> Self {
        let remaining = (1..=evaluator.num_features()).collect();
        Self {
            evaluator,
            reporter,
            selected: FeatureSet::new(),
            remaining,
            best: BestSoFar::default(),
            baseline: None,
            step: 0,
        }
    }

    /// Features chosen so far, in the order they were added.
    pub fn selected(&self) -> &FeatureSet {
        &self.selected
    }

    fn start(&mut self) -> StepRecord {
        let full = FeatureSet::full(self.evaluator.num_features());
        let baseline = self.evaluator.accuracy(&full);
        self.reporter.report_baseline(&full, baseline);
        self.baseline = Some(baseline);

        let record = StepRecord {
            step: 0,
            features: self.selected.clone(),
            accuracy: self.evaluator.accuracy(&self.selected),
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
            &self.remaining,
            |f| selected.with(f),
        )?;

        self.remaining.retain(|&f| f != feature);
        self.selected.insert(feature);
        self.step += 1;

        let record = StepRecord {
            step: self.step,
            features: self.selected.clone(),
            accuracy,
            change: Some(StepChange::Added(feature)),
        };
        self.reporter.report_step(&record, self.evaluator.num_features());
        if !self.best.offer(&self.selected, accuracy) {
            self.reporter.report_warning(&record, self.best.accuracy);
        }
        Some(record)
    }
}

impl<E, R> Iterator for ForwardSelector<E, R>
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

impl<E, R> FeatureSearch for ForwardSelector<E, R>
where
    E: SubsetEvaluator,
    R: SearchReporter,
{
    fn kind(&self) -> SearchKind {
        SearchKind::Forward
    }

    fn best(&self) -> (&FeatureSet, f64) {
        (&self.best.features, self.best.accuracy)
    }

    fn baseline_accuracy(&self) -> Option<f64> {
        self.baseline
    }
}
