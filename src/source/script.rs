//! Scripted trigger source replaying a fixed schedule of delays.
//!
//! The source sleeps for each delay in turn and emits one trigger after it,
//! then lets the channel disconnect. This drives the simulation mode and the
//! demo without any hardware attached.

use crate::source::types::TriggerEvent;
use crate::source::SourceError;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Trigger source that replays a schedule of inter-trigger delays.
pub struct ScriptedSource {
    schedule: Vec<Duration>,
    sender: Option<Sender<TriggerEvent>>,
    receiver: Receiver<TriggerEvent>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl ScriptedSource {
    /// Create a source from a schedule of delays before each trigger.
    pub fn new(schedule: Vec<Duration>) -> Self {
        let (sender, receiver) = bounded(1_000);
        Self {
            schedule,
            sender: Some(sender),
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// The built-in demo schedule: a steady run, a direction change that
    /// double-triggers the sensor, a pause off the wheel, a second run, and
    /// a final gap long enough to close the last cycle.
    pub fn demo_run() -> Self {
        let mut schedule = Vec::new();
        // Steady run: one revolution every 2 seconds
        schedule.extend(std::iter::repeat(Duration::from_secs(2)).take(5));
        // Turn-around: the sensor fires twice in quick succession
        schedule.push(Duration::from_millis(300));
        schedule.push(Duration::from_millis(300));
        // Off the wheel, then back on
        schedule.push(Duration::from_secs(12));
        schedule.extend(std::iter::repeat(Duration::from_secs(2)).take(5));
        // Final gap so the second run gets closed out
        schedule.push(Duration::from_secs(12));
        Self::new(schedule)
    }

    /// Number of triggers the schedule will emit.
    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    /// Check if the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Start replaying the schedule in a background thread.
    ///
    /// When the schedule is exhausted the sender drops and the receiver
    /// sees a disconnect.
    pub fn start(&mut self) -> Result<(), SourceError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }
        let sender = self.sender.take().ok_or(SourceError::AlreadyRunning)?;

        self.running.store(true, Ordering::SeqCst);
        let running = self.running.clone();
        let schedule = std::mem::take(&mut self.schedule);

        let handle = thread::spawn(move || {
            for delay in schedule {
                thread::sleep(delay);
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                if sender.send(TriggerEvent::now()).is_err() {
                    break;
                }
            }
            running.store(false, Ordering::SeqCst);
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Stop the replay. The thread checks the flag after its current sleep
    /// and is detached rather than joined, so stopping never waits out a
    /// long gap in the schedule.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        // Detach the replay thread; it exits on its next flag check.
        let _ = self.thread_handle.take();
    }

    /// Check if the source is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for trigger events.
    pub fn receiver(&self) -> &Receiver<TriggerEvent> {
        &self.receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_schedule_length() {
        let source = ScriptedSource::demo_run();
        assert_eq!(source.len(), 13);
    }

    #[test]
    fn test_scripted_replay_emits_and_disconnects() {
        let mut source = ScriptedSource::new(vec![Duration::from_millis(1); 3]);
        source.start().unwrap();

        let receiver = source.receiver().clone();
        for _ in 0..3 {
            let event = receiver
                .recv_timeout(Duration::from_secs(1))
                .expect("expected a trigger");
            assert!(event.timestamp <= chrono::Utc::now());
        }
        // Schedule exhausted: the channel disconnects.
        assert!(receiver.recv_timeout(Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_double_start_rejected() {
        let mut source = ScriptedSource::new(vec![Duration::from_millis(50)]);
        source.start().unwrap();
        assert!(source.start().is_err());
        source.stop();
    }
}
