//! Persistence of search step records.
//!
//! The CSV artifact has a `Feature Set,Accuracy` header followed by one row
//! per step: the brace-formatted subset and its accuracy as a percentage
//! rounded to two decimals. Rows are flushed as they are written so an
//! interrupted run keeps every completed step.

use crate::error::Result;
use crate::search::StepRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header of the CSV artifact.
pub const CSV_HEADER: [&str; 2] = ["Feature Set", "Accuracy"];

/// Consumes step records as a search produces them.
pub trait ResultSink {
    fn record(&mut self, record: &StepRecord) -> Result<()>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn record(&mut self, record: &StepRecord) -> Result<()> {
        (**self).record(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Writes records as CSV rows, flushing after each one.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let sink = Self::new(File::create(path)?)?;
        tracing::debug!(path = %path.display(), "Opened result file");
        Ok(sink)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Data rows written so far, not counting the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.error().to_string()).into())
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn record(&mut self, record: &StepRecord) -> Result<()> {
        let features = record.features.to_string();
        let accuracy = format_accuracy(record.accuracy);
        self.writer.write_record([features.as_str(), accuracy.as_str()])?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub records: Vec<StepRecord>,
}

impl ResultSink for MemorySink {
    fn record(&mut self, record: &StepRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// One parsed row of a result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Feature Set")]
    pub feature_set: String,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
}

/// Read back a result file written by [`CsvSink`].
pub fn read_results(path: impl AsRef<Path>) -> Result<Vec<ResultRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<ResultRow>, csv::Error>>()?;
    Ok(rows)
}

/// Accuracy as a percentage rounded to two decimals (halves to even), always
/// with at least one decimal digit: `0.5 -> "50.0"`, `2/3 -> "66.67"`.
pub fn format_accuracy(accuracy: f64) -> String {
    let percent = (accuracy * 100.0 * 100.0).round_ties_even() / 100.0;
    if percent.fract() == 0.0 {
        format!("{percent:.1}")
    } else {
        format!("{percent}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FeatureSet;
    use crate::search::StepChange;

    fn record(features: Vec<usize>, accuracy: f64) -> StepRecord {
        StepRecord {
            step: features.len(),
            features: FeatureSet::from(features),
            accuracy,
            change: None,
        }
    }

    #[test]
    fn test_format_accuracy() {
        assert_eq!(format_accuracy(0.5), "50.0");
        assert_eq!(format_accuracy(2.0 / 3.0), "66.67");
        assert_eq!(format_accuracy(1.0), "100.0");
        assert_eq!(format_accuracy(0.0), "0.0");
        assert_eq!(format_accuracy(0.123), "12.3");
    }

    #[test]
    fn test_format_accuracy_rounds_halves_to_even() {
        assert_eq!(format_accuracy(1.0 / 32.0), "3.12");
        assert_eq!(format_accuracy(5.0 / 32.0), "15.62");
        assert_eq!(format_accuracy(3.0 / 32.0), "9.38");
    }

    #[test]
    fn test_csv_layout() {
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        sink.record(&record(vec![], 0.25)).unwrap();
        sink.record(&StepRecord {
            step: 1,
            features: FeatureSet::from(vec![3]),
            accuracy: 0.75,
            change: Some(StepChange::Added(3)),
        })
        .unwrap();
        sink.record(&record(vec![3, 1], 2.0 / 3.0)).unwrap();
        assert_eq!(sink.rows(), 3);

        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "Feature Set,Accuracy\n{},25.0\n{3},75.0\n\"{3, 1}\",66.67\n"
        );
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::default();
        sink.record(&record(vec![1], 0.5)).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.records.len(), 1);
    }
}
