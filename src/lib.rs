//! Treadmill Log - wheel rotation logger for a sensor-equipped treadmill.
//!
//! A reed switch on the treadmill wheel fires once per revolution. This
//! library filters out double-triggers, groups the remaining triggers into
//! record cycles separated by inactivity, derives distance and speed per
//! cycle, and appends a human-readable summary to a log file.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Treadmill Log                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//! │  │  Source  │──▶│ Debounce │──▶│ Segmenter │──▶│ Metrics │  │
//! │  │ (stdin / │   │ (>= 1s)  │   │ (10s min  │   │ (dist / │  │
//! │  │  script) │   │          │   │  cycles)  │   │  speed) │  │
//! │  └──────────┘   └──────────┘   └───────────┘   └────┬────┘  │
//! │        │                                            ▼       │
//! │  ┌──────────┐                                 ┌──────────┐  │
//! │  │ Session  │                                 │ Log Sink │  │
//! │  │  Stats   │                                 │ (append) │  │
//! │  └──────────┘                                 └──────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cycles close only when a new trigger arrives; the logger never wakes up
//! on its own to flush a stale cycle. The trigger that closes a cycle also
//! marks the start of the next one and is counted in neither.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use treadmill_log::core::{CycleSegmenter, DebounceFilter};
//!
//! let mut filter = DebounceFilter::new(std::time::Duration::from_secs(1));
//! let mut segmenter = CycleSegmenter::new(10, 1.0);
//!
//! let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
//! for secs in [0, 2, 4, 6, 8, 11] {
//!     let t = start + Duration::seconds(secs);
//!     if filter.accept(t).is_accepted() {
//!         if let Some(summary) = segmenter.process_trigger(t) {
//!             println!("{:.2} km at {:.2} km/h", summary.distance_km, summary.speed_kmh);
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod core;
pub mod sink;
pub mod source;
pub mod stats;

// Re-export key types at crate root for convenience
pub use config::Config;
pub use core::{
    compute_metrics, CycleMetrics, CycleSegmenter, CycleSummary, DebounceFilter, Decision,
};
pub use sink::{FileLogSink, SummarySink};
pub use source::{ScriptedSource, StdinSource, TriggerEvent};
pub use stats::{SessionStats, SharedSessionStats, StatsSnapshot};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
