//! Log sink for closed record cycles.
//!
//! The file sink appends one human-readable block per cycle. The file is
//! opened and closed around each write, so a crash between cycles never
//! leaves the log half-flushed; prior entries are never touched.

use crate::core::segmenter::CycleSummary;
use chrono::{DateTime, Local, Utc};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Timestamp layout used in the log file, rendered in local time.
const TIMESTAMP_FORMAT: &str = "%H:%M:%S - %d/%m/%y";

/// Destination for cycle summaries.
pub trait SummarySink {
    /// Append one summary. Failures surface to the caller; the pipeline's
    /// in-memory state is never rolled back on a failed write.
    fn record(&mut self, summary: &CycleSummary) -> io::Result<()>;
}

/// Append-only text file sink.
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    /// Create a sink writing to the given path. The file is created on the
    /// first write.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the log file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SummarySink for FileLogSink {
    fn record(&mut self, summary: &CycleSummary) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(format_summary(summary).as_bytes())?;
        Ok(())
    }
}

/// Render a summary as the fixed log block, blank-line terminated.
pub fn format_summary(summary: &CycleSummary) -> String {
    format!(
        "Start time: {} - End time: {}\nDistance: {:.2} kilometers\nSpeed: {:.2} kilometers/hour\n\n",
        format_timestamp(summary.start_time),
        format_timestamp(summary.end_time),
        summary.distance_km,
        summary.speed_kmh,
    )
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
