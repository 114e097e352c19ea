//! Session statistics for the trigger pipeline.
//!
//! Counts what flowed through the pipeline without keeping any raw event
//! history. Counters can persist across sessions as a small JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for the current session.
#[derive(Debug)]
pub struct SessionStats {
    /// Raw triggers observed from the source
    triggers_observed: AtomicU64,
    /// Triggers accepted by the debounce filter
    triggers_accepted: AtomicU64,
    /// Triggers dropped as double-triggers
    triggers_debounced: AtomicU64,
    /// Cycle summaries written to the log
    cycles_recorded: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting counters
    persist_path: Option<PathBuf>,
}

impl SessionStats {
    /// Create empty session stats.
    pub fn new() -> Self {
        Self {
            triggers_observed: AtomicU64::new(0),
            triggers_accepted: AtomicU64::new(0),
            triggers_debounced: AtomicU64::new(0),
            cycles_recorded: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create stats that load from and save to the given path.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut stats = Self::new();
        stats.persist_path = Some(path);

        if let Err(e) = stats.load() {
            eprintln!("Note: Could not load previous session stats: {e}");
        }

        stats
    }

    /// Record a raw trigger from the source.
    pub fn record_trigger(&self) {
        self.triggers_observed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a trigger accepted by the debounce filter.
    pub fn record_accepted(&self) {
        self.triggers_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a trigger dropped by the debounce filter.
    pub fn record_debounced(&self) {
        self.triggers_debounced.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cycle summary written to the log.
    pub fn record_cycle(&self) {
        self.cycles_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            triggers_observed: self.triggers_observed.load(Ordering::Relaxed),
            triggers_accepted: self.triggers_accepted.load(Ordering::Relaxed),
            triggers_debounced: self.triggers_debounced.load(Ordering::Relaxed),
            cycles_recorded: self.cycles_recorded.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds() as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.snapshot();
        format!(
            "Session Statistics:\n\
             - Triggers observed: {}\n\
             - Triggers accepted: {}\n\
             - Triggers debounced: {}\n\
             - Cycles recorded: {}\n\
             - Session duration: {} seconds",
            stats.triggers_observed,
            stats.triggers_accepted,
            stats.triggers_debounced,
            stats.cycles_recorded,
            stats.session_duration_secs
        )
    }

    /// Save counters to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.snapshot();
            let persisted = PersistedStats {
                triggers_observed: stats.triggers_observed,
                triggers_accepted: stats.triggers_accepted,
                triggers_debounced: stats.triggers_debounced,
                cycles_recorded: stats.cycles_recorded,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load counters from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.triggers_observed
                    .store(persisted.triggers_observed, Ordering::Relaxed);
                self.triggers_accepted
                    .store(persisted.triggers_accepted, Ordering::Relaxed);
                self.triggers_debounced
                    .store(persisted.triggers_debounced, Ordering::Relaxed);
                self.cycles_recorded
                    .store(persisted.cycles_recorded, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.triggers_observed.store(0, Ordering::Relaxed);
        self.triggers_accepted.store(0, Ordering::Relaxed);
        self.triggers_debounced.store(0, Ordering::Relaxed);
        self.cycles_recorded.store(0, Ordering::Relaxed);
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub triggers_observed: u64,
    pub triggers_accepted: u64,
    pub triggers_debounced: u64,
    pub cycles_recorded: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Counter format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    triggers_observed: u64,
    triggers_accepted: u64,
    triggers_debounced: u64,
    cycles_recorded: u64,
    last_updated: DateTime<Utc>,
}

/// Thread-safe shared session stats.
pub type SharedSessionStats = Arc<SessionStats>;

/// Create new shared session stats.
pub fn create_shared_stats() -> SharedSessionStats {
    Arc::new(SessionStats::new())
}

/// Create shared session stats with persistence.
pub fn create_shared_stats_with_persistence(path: PathBuf) -> SharedSessionStats {
    Arc::new(SessionStats::with_persistence(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting() {
        let stats = SessionStats::new();

        stats.record_trigger();
        stats.record_trigger();
        stats.record_accepted();
        stats.record_debounced();
        stats.record_cycle();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.triggers_observed, 2);
        assert_eq!(snapshot.triggers_accepted, 1);
        assert_eq!(snapshot.triggers_debounced, 1);
        assert_eq!(snapshot.cycles_recorded, 1);
    }

    #[test]
    fn test_reset() {
        let stats = SessionStats::new();
        stats.record_trigger();
        stats.record_cycle();
        stats.reset();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.triggers_observed, 0);
        assert_eq!(snapshot.cycles_recorded, 0);
    }

    #[test]
    fn test_summary_format() {
        let stats = SessionStats::new();
        let summary = stats.summary();

        assert!(summary.contains("Triggers observed"));
        assert!(summary.contains("Triggers debounced"));
        assert!(summary.contains("Cycles recorded"));
    }

    #[test]
    fn test_persistence_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "treadmill-log-stats-test-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let stats = SessionStats::with_persistence(path.clone());
        stats.record_trigger();
        stats.record_accepted();
        stats.record_cycle();
        stats.save().unwrap();

        let reloaded = SessionStats::with_persistence(path.clone());
        let snapshot = reloaded.snapshot();
        assert_eq!(snapshot.triggers_observed, 1);
        assert_eq!(snapshot.triggers_accepted, 1);
        assert_eq!(snapshot.cycles_recorded, 1);

        let _ = std::fs::remove_file(&path);
    }
}
