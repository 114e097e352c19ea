//! Cycle segmentation for the accepted trigger stream.
//!
//! Accepted triggers accumulate into a record cycle. A cycle closes when a
//! new trigger arrives after the cycle has run for at least the configured
//! interval; the closing trigger is reused as the start marker of the next
//! cycle. Cycles never close on elapsed time alone - a stale cycle stays
//! open until the next trigger (or forever).

use crate::core::metrics::{self, CycleMetrics};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An open record cycle accumulating triggers.
#[derive(Debug, Clone)]
pub struct Cycle {
    /// Timestamp of the bootstrap trigger
    pub start_time: DateTime<Utc>,
    /// Accepted triggers since bootstrap (the bootstrap itself is excluded)
    pub trigger_count: u32,
    /// Timestamp of the most recent accepted trigger
    pub last_trigger_time: DateTime<Utc>,
}

impl Cycle {
    /// Open a cycle from its bootstrap trigger. The bootstrap only marks the
    /// boundary and is not counted.
    fn bootstrap(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            trigger_count: 0,
            last_trigger_time: start_time,
        }
    }

    /// Time the cycle has been running as of `now`, in seconds.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        (now - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

/// Immutable summary of a closed cycle, as handed to the log sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub trigger_count: u32,
    pub distance_km: f64,
    pub speed_kmh: f64,
}

/// State machine turning accepted triggers into record cycles.
pub struct CycleSegmenter {
    /// Minimum cycle duration before the next trigger closes it
    interval: Duration,
    /// Wheel diameter used for the metrics at close
    wheel_diameter_m: f64,
    /// Cycle currently accumulating, if any
    current: Option<Cycle>,
}

impl CycleSegmenter {
    /// Create a segmenter with the given cycle interval and wheel diameter.
    pub fn new(interval_secs: u64, wheel_diameter_m: f64) -> Self {
        Self {
            interval: Duration::seconds(interval_secs as i64),
            wheel_diameter_m,
            current: None,
        }
    }

    /// Process one accepted trigger.
    ///
    /// Returns the summary of the cycle this trigger closed, if any. The
    /// close check runs before anything is counted, and the closing trigger
    /// then bootstraps the next cycle without being counted there either.
    /// A close with zero counted triggers re-bootstraps silently.
    pub fn process_trigger(&mut self, now: DateTime<Utc>) -> Option<CycleSummary> {
        match self.current.take() {
            None => {
                self.current = Some(Cycle::bootstrap(now));
                None
            }
            Some(cycle) if now - cycle.start_time >= self.interval => {
                let summary = close_cycle(&cycle, now, self.wheel_diameter_m);
                self.current = Some(Cycle::bootstrap(now));
                summary
            }
            Some(mut cycle) => {
                cycle.trigger_count += 1;
                cycle.last_trigger_time = now;
                self.current = Some(cycle);
                None
            }
        }
    }

    /// The cycle currently accumulating, if one is open.
    pub fn current_cycle(&self) -> Option<&Cycle> {
        self.current.as_ref()
    }
}

/// Finalize a cycle at `end_time`. Empty cycles (no counted triggers)
/// produce no summary.
fn close_cycle(cycle: &Cycle, end_time: DateTime<Utc>, wheel_diameter_m: f64) -> Option<CycleSummary> {
    if cycle.trigger_count == 0 {
        return None;
    }

    let CycleMetrics {
        distance_km,
        speed_kmh,
    } = metrics::compute_metrics(cycle.start_time, end_time, cycle.trigger_count, wheel_diameter_m);

    Some(CycleSummary {
        start_time: cycle.start_time,
        end_time,
        trigger_count: cycle.trigger_count,
        distance_km,
        speed_kmh,
    })
}
