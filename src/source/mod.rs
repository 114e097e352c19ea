//! Trigger sources for the treadmill logger.
//!
//! The core consumes bare timestamps, so anything that can put
//! [`TriggerEvent`]s on a channel works as a source: a wired-up reed switch
//! bridge, stdin for manual testing, or a scripted replay.

pub mod script;
pub mod stdin;
pub mod types;

// Re-export commonly used types
pub use script::ScriptedSource;
pub use stdin::StdinSource;
pub use types::TriggerEvent;

/// Errors that can occur while running a trigger source.
#[derive(Debug)]
pub enum SourceError {
    AlreadyRunning,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::AlreadyRunning => write!(f, "Trigger source is already running"),
        }
    }
}

impl std::error::Error for SourceError {}
