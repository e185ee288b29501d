//! Human-readable progress output for interactive runs.

use featsel_core::report::percent;
use featsel_core::{FeatureSet, SearchOutcome, SearchReporter, StepChange, StepRecord};
use std::fmt;
use std::io::{self, Write};

/// Prints search progress to a writer (stdout in the binary).
///
/// Write errors do not stop the search; the first one is logged and the rest
/// are dropped.
pub struct ConsoleReporter<W: Write> {
    out: W,
    show_candidates: bool,
    write_failed: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_candidates: true,
            write_failed: false,
        }
    }

    /// Hide the per-candidate lines, keeping step summaries.
    pub fn without_candidates(mut self) -> Self {
        self.show_candidates = false;
        self
    }

    /// Whether any write to the underlying writer has failed.
    pub fn write_failed(&self) -> bool {
        self.write_failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let result = self.out.write_fmt(args).and_then(|()| self.out.write_all(b"\n"));
        self.check(result);
    }

    fn check(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if !self.write_failed {
                tracing::debug!(error = %e, "Console output failed, further output dropped");
            }
            self.write_failed = true;
        }
    }
}

impl<W: Write> SearchReporter for ConsoleReporter<W> {
    fn report_baseline(&mut self, _features: &FeatureSet, accuracy: f64) {
        self.line(format_args!(
            "Running nearest neighbor with all features using 'leaving-one-out' evaluation gives accuracy: {}\n",
            percent(accuracy)
        ));
    }

    fn report_candidate(&mut self, features: &FeatureSet, accuracy: f64) {
        if self.show_candidates {
            self.line(format_args!(
                "\tUsing feature(s) {features}, accuracy is {}",
                percent(accuracy)
            ));
        }
    }

    fn report_step(&mut self, record: &StepRecord, total_features: usize) {
        let Some(change) = record.change else {
            return;
        };
        self.line(format_args!(
            "Feature set {} was best, accuracy is {}",
            record.features,
            percent(record.accuracy)
        ));
        match change {
            StepChange::Added(_) => self.line(format_args!(
                "Selected {} out of {total_features} features.\n",
                record.features.len()
            )),
            StepChange::Removed(feature) => self.line(format_args!(
                "Removed {feature}. Remaining {} features.\n",
                record.features.len()
            )),
        }
    }

    fn report_warning(&mut self, _record: &StepRecord, _best_accuracy: f64) {
        self.line(format_args!(
            "(Warning, Accuracy has decreased! Continuing search in case of local maxima)\n"
        ));
    }

    fn report_final(&mut self, outcome: &SearchOutcome) {
        self.line(format_args!(
            "Finished search!! The best feature subset is {}, which has an accuracy of {}",
            outcome.best_features,
            percent(outcome.best_accuracy)
        ));
        self.line(format_args!(
            "Elapsed time: {:.1} seconds",
            outcome.elapsed_secs
        ));
        let result = self.out.flush();
        self.check(result);
    }
}
