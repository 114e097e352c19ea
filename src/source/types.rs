//! Trigger event type shared by all sources.
//!
//! A trigger carries nothing but the moment the sensor fired; every other
//! attribute of a record cycle is derived downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single rotation-sensor activation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Timestamp when the sensor fired
    pub timestamp: DateTime<Utc>,
}

impl TriggerEvent {
    /// Create a trigger stamped with the current time.
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }

    /// Create a trigger at an explicit timestamp (replay and tests).
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }
}
