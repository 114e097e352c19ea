//! Distance and speed derivation for a closed record cycle.
//!
//! One accepted trigger is one wheel revolution, so distance is the trigger
//! count times the wheel circumference. Pure computation, no side effects.

use chrono::{DateTime, Utc};

/// Default wheel diameter in meters.
pub const DEFAULT_WHEEL_DIAMETER_M: f64 = 1.0;

/// Derived metrics for a record cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleMetrics {
    pub distance_km: f64,
    pub speed_kmh: f64,
}

/// Compute distance and speed from a cycle's boundaries and revolution count.
///
/// `speed_kmh` is clamped to zero when the elapsed time is not positive.
/// The debounce filter makes a zero-elapsed cycle all but impossible, but a
/// bootstrap followed by an immediate close must not divide by zero.
pub fn compute_metrics(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    trigger_count: u32,
    wheel_diameter_m: f64,
) -> CycleMetrics {
    let circumference_m = wheel_diameter_m * std::f64::consts::PI;
    let distance_m = trigger_count as f64 * circumference_m;
    let distance_km = distance_m / 1000.0;

    let elapsed_secs = (end_time - start_time).num_milliseconds() as f64 / 1000.0;
    let speed_kmh = if elapsed_secs > 0.0 {
        (distance_m / elapsed_secs) * 3.6
    } else {
        0.0
    };

    CycleMetrics {
        distance_km,
        speed_kmh,
    }
}
