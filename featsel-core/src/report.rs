//! Progress reporting hooks for feature searches.
//!
//! Searches never print. They call a [`SearchReporter`], which the caller
//! picks: the CLI prints to the console, tests record events, and library
//! users can route everything through `tracing`.

use crate::dataset::FeatureSet;
use crate::search::{SearchOutcome, StepChange, StepRecord};

/// Receives search progress as it happens.
pub trait SearchReporter {
    /// Accuracy of the full feature set, reported once before the first step.
    fn report_baseline(&mut self, _features: &FeatureSet, _accuracy: f64) {}

    /// One candidate subset was scored.
    fn report_candidate(&mut self, features: &FeatureSet, accuracy: f64);

    /// A step committed a feature change (or recorded the starting subset).
    fn report_step(&mut self, record: &StepRecord, total_features: usize);

    /// The step's accuracy did not beat the best seen so far.
    fn report_warning(&mut self, record: &StepRecord, best_accuracy: f64);

    /// The search finished.
    fn report_final(&mut self, outcome: &SearchOutcome);
}

impl<R: SearchReporter + ?Sized> SearchReporter for &mut R {
    fn report_baseline(&mut self, features: &FeatureSet, accuracy: f64) {
        (**self).report_baseline(features, accuracy)
    }

    fn report_candidate(&mut self, features: &FeatureSet, accuracy: f64) {
        (**self).report_candidate(features, accuracy)
    }

    fn report_step(&mut self, record: &StepRecord, total_features: usize) {
        (**self).report_step(record, total_features)
    }

    fn report_warning(&mut self, record: &StepRecord, best_accuracy: f64) {
        (**self).report_warning(record, best_accuracy)
    }

    fn report_final(&mut self, outcome: &SearchOutcome) {
        (**self).report_final(outcome)
    }
}

/// Fan out to two reporters, first `A` then `B`.
impl<A: SearchReporter, B: SearchReporter> SearchReporter for (A, B) {
    fn report_baseline(&mut self, features: &FeatureSet, accuracy: f64) {
        self.0.report_baseline(features, accuracy);
        self.1.report_baseline(features, accuracy);
    }

    fn report_candidate(&mut self, features: &FeatureSet, accuracy: f64) {
        self.0.report_candidate(features, accuracy);
        self.1.report_candidate(features, accuracy);
    }

    fn report_step(&mut self, record: &StepRecord, total_features: usize) {
        self.0.report_step(record, total_features);
        self.1.report_step(record, total_features);
    }

    fn report_warning(&mut self, record: &StepRecord, best_accuracy: f64) {
        self.0.report_warning(record, best_accuracy);
        self.1.report_warning(record, best_accuracy);
    }

    fn report_final(&mut self, outcome: &SearchOutcome) {
        self.0.report_final(outcome);
        self.1.report_final(outcome);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl SearchReporter for SilentReporter {
    fn report_candidate(&mut self, _features: &FeatureSet, _accuracy: f64) {}
    fn report_step(&mut self, _record: &StepRecord, _total_features: usize) {}
    fn report_warning(&mut self, _record: &StepRecord, _best_accuracy: f64) {}
    fn report_final(&mut self, _outcome: &SearchOutcome) {}
}

/// Emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl SearchReporter for TracingReporter {
    fn report_baseline(&mut self, features: &FeatureSet, accuracy: f64) {
        tracing::info!(features = %features, accuracy, "Baseline with all features");
    }

    fn report_candidate(&mut self, features: &FeatureSet, accuracy: f64) {
        tracing::debug!(features = %features, accuracy, "Evaluated candidate subset");
    }

    fn report_step(&mut self, record: &StepRecord, total_features: usize) {
        match record.change {
            Some(StepChange::Added(feature)) => tracing::info!(
                step = record.step,
                feature,
                features = %record.features,
                accuracy = record.accuracy,
                total_features,
                "Added feature"
            ),
            Some(StepChange::Removed(feature)) => tracing::info!(
                step = record.step,
                feature,
                features = %record.features,
                accuracy = record.accuracy,
                total_features,
                "Removed feature"
            ),
            None => tracing::info!(
                features = %record.features,
                accuracy = record.accuracy,
                "Starting subset"
            ),
        }
    }

    fn report_warning(&mut self, record: &StepRecord, best_accuracy: f64) {
        tracing::warn!(
            step = record.step,
            accuracy = record.accuracy,
            best_accuracy,
            "Accuracy did not improve, continuing in case of a local maximum"
        );
    }

    fn report_final(&mut self, outcome: &SearchOutcome) {
        tracing::info!(
            kind = %outcome.kind,
            best_features = %outcome.best_features,
            best_accuracy = outcome.best_accuracy,
            elapsed_secs = outcome.elapsed_secs,
            "Search finished"
        );
    }
}

/// A single captured reporter call.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Baseline { features: FeatureSet, accuracy: f64 },
    Candidate { features: FeatureSet, accuracy: f64 },
    Step(StepRecord),
    Warning { step: usize, best_accuracy: f64 },
    Final(SearchOutcome),
}

/// Keeps every event in order, for tests and post-run inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate subsets scored, in evaluation order.
    pub fn candidates(&self) -> Vec<&FeatureSet> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Candidate { features, .. } => Some(features),
                _ => None,
            })
            .collect()
    }

    pub fn steps(&self) -> Vec<&StepRecord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Step(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn warning_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ReportEvent::Warning { .. }))
            .count()
    }
}

impl SearchReporter for RecordingReporter {
    fn report_baseline(&mut self, features: &FeatureSet, accuracy: f64) {
        self.events.push(ReportEvent::Baseline {
            features: features.clone(),
            accuracy,
        });
    }

    fn report_candidate(&mut self, features: &FeatureSet, accuracy: f64) {
        self.events.push(ReportEvent::Candidate {
            features: features.clone(),
            accuracy,
        });
    }

    fn report_step(&mut self, record: &StepRecord, _total_features: usize) {
        self.events.push(ReportEvent::Step(record.clone()));
    }

    fn report_warning(&mut self, record: &StepRecord, best_accuracy: f64) {
        self.events.push(ReportEvent::Warning {
            step: record.step,
            best_accuracy,
        });
    }

    fn report_final(&mut self, outcome: &SearchOutcome) {
        self.events.push(ReportEvent::Final(outcome.clone()));
    }
}

/// Accuracy as a percentage with one decimal, e.g. `66.7%`.
pub fn percent(accuracy: f64) -> String {
    format!("{:.1}%", accuracy * 100.0)
}
