//! Manual trigger source reading from standard input.
//!
//! Each line read (usually just Enter) counts as one sensor activation,
//! stamped at the moment it is read. Useful as a bench rig when no reed
//! switch is wired up.

use crate::source::types::TriggerEvent;
use crate::source::SourceError;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Trigger source backed by stdin lines.
pub struct StdinSource {
    sender: Option<Sender<TriggerEvent>>,
    receiver: Receiver<TriggerEvent>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl StdinSource {
    /// Create a new stdin source.
    pub fn new() -> Self {
        // Bounded channel to prevent unbounded memory growth
        let (sender, receiver) = bounded(1_000);
        Self {
            sender: Some(sender),
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Start reading triggers in a background thread.
    ///
    /// The channel disconnects when stdin reaches EOF, which ends the run.
    pub fn start(&mut self) -> Result<(), SourceError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }
        let sender = self.sender.take().ok_or(SourceError::AlreadyRunning)?;

        self.running.store(true, Ordering::SeqCst);
        let running = self.running.clone();

        let handle = thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() || !running.load(Ordering::SeqCst) {
                    break;
                }
                if sender.send(TriggerEvent::now()).is_err() {
                    break;
                }
            }
            running.store(false, Ordering::SeqCst);
            // Sender drops here; the receiver sees a disconnect.
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Stop accepting triggers.
    ///
    /// The reader thread exits on the next line (or EOF); it is not joined
    /// because stdin reads cannot be interrupted.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        // Detach the reader thread; it exits on its next flag check.
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

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}
