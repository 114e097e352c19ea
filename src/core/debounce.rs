//! Debounce filter for the raw trigger stream.
//!
//! A magnet passing the reed switch can fire it more than once, and a
//! direction change on the wheel produces a rapid double-trigger. Triggers
//! arriving within the threshold of the last accepted one are dropped.

use chrono::{DateTime, Duration, Utc};

/// Decision for a single candidate trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    /// Too close to the previous accepted trigger; dropped without
    /// touching any state.
    Debounced,
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

/// Stateful filter tracking the last accepted trigger timestamp.
pub struct DebounceFilter {
    threshold: Duration,
    last_accepted: Option<DateTime<Utc>>,
}

impl DebounceFilter {
    /// Create a filter with the given minimum gap between accepted triggers.
    pub fn new(threshold: std::time::Duration) -> Self {
        Self {
            threshold: Duration::milliseconds(threshold.as_millis() as i64),
            last_accepted: None,
        }
    }

    /// Judge a candidate trigger.
    ///
    /// The first trigger ever is always accepted. After that, a trigger is
    /// accepted iff the gap since the last accepted one is at least the
    /// threshold (inclusive boundary). `last_accepted` moves only on
    /// acceptance; rejected triggers leave the filter untouched.
    pub fn accept(&mut self, timestamp: DateTime<Utc>) -> Decision {
        match self.last_accepted {
            Some(last) if timestamp - last < self.threshold => Decision::Debounced,
            _ => {
                self.last_accepted = Some(timestamp);
                Decision::Accepted
            }
        }
    }

    /// Timestamp of the most recently accepted trigger, if any.
    pub fn last_accepted(&self) -> Option<DateTime<Utc>> {
        self.last_accepted
    }
}
