//! # featsel-core: greedy feature selection for nearest-neighbor classifiers
//!
//! Scores feature subsets by leave-one-out accuracy of a 1-nearest-neighbor
//! classifier (squared Euclidean distance) and searches for a good subset
//! greedily, either forward from no features or backward from all of them.
//!
//! The search itself is an iterator of step records; progress goes to a
//! [`SearchReporter`] and persistence to a [`ResultSink`], so the algorithm
//! never touches the console or the filesystem directly.

pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod evaluate;
pub mod report;
pub mod search;
pub mod sink;

// Re-exports
pub use config::{SelectionConfig, load_config};
pub use dataset::{Dataset, FeatureIndex, FeatureSet};
pub use distance::DistanceMatrix;
pub use error::SelectionError;
pub use evaluate::{LeaveOneOut, SubsetEvaluator, leave_one_out_accuracy};
pub use report::{RecordingReporter, SearchReporter, SilentReporter, TracingReporter};
pub use search::{
    BackwardEliminator, FeatureSearch, ForwardSelector, SearchKind, SearchOutcome, StepChange,
    StepRecord, run_search,
};
pub use sink::{CsvSink, MemorySink, ResultSink, read_results};
