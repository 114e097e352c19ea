//! Core pipeline for the treadmill logger.
//!
//! This module contains:
//! - Debounce filtering of the raw trigger stream
//! - Cycle segmentation of accepted triggers
//! - Distance/speed metrics for closed cycles

pub mod debounce;
pub mod metrics;
pub mod segmenter;

// Re-export commonly used types
pub use debounce::{DebounceFilter, Decision};
pub use metrics::{compute_metrics, CycleMetrics, DEFAULT_WHEEL_DIAMETER_M};
pub use segmenter::{Cycle, CycleSegmenter, CycleSummary};
