//! Demonstration of the treadmill logger pipeline on the demo schedule.
//!
//! This example shows how to:
//! 1. Create and start a scripted trigger source
//! 2. Debounce and segment the trigger stream
//! 3. Append cycle summaries to a log file
//!
//! Run with: cargo run --example replay_demo
//!
//! The replay takes about 36 seconds of wall-clock time and writes its
//! cycle log to the working directory.

use std::time::Duration;

use treadmill_log::{
    core::{CycleSegmenter, DebounceFilter, Decision},
    sink::{FileLogSink, SummarySink},
    source::ScriptedSource,
    stats::SessionStats,
};

fn main() {
    println!("Treadmill Log - Replay Demo");
    println!("===========================");
    println!();

    let mut filter = DebounceFilter::new(Duration::from_secs(1));
    let mut segmenter = CycleSegmenter::new(10, 1.0);
    let mut sink = FileLogSink::new("demo-log.txt".into());
    let stats = SessionStats::new();

    let mut source = ScriptedSource::demo_run();
    println!("Replaying {} scheduled triggers...", source.len());
    println!();

    if let Err(e) = source.start() {
        eprintln!("Error starting source: {e}");
        return;
    }

    let receiver = source.receiver().clone();

    // The schedule is finite; the channel disconnects when it ends.
    while let Ok(event) = receiver.recv() {
        stats.record_trigger();
        println!(
            "  Trigger at {}",
            event.timestamp.format("%H:%M:%S%.3f")
        );

        match filter.accept(event.timestamp) {
            Decision::Debounced => {
                stats.record_debounced();
                println!("  (debounced)");
            }
            Decision::Accepted => {
                stats.record_accepted();
                if let Some(summary) = segmenter.process_trigger(event.timestamp) {
                    println!();
                    println!("=== Cycle Closed ===");
                    println!("  Revolutions: {}", summary.trigger_count);
                    println!("  Distance: {:.2} km", summary.distance_km);
                    println!("  Speed: {:.2} km/h", summary.speed_kmh);
                    println!();

                    match sink.record(&summary) {
                        Ok(()) => stats.record_cycle(),
                        Err(e) => eprintln!("Error writing summary: {e}"),
                    }
                }
            }
        }
    }

    println!();
    println!("{}", stats.summary());
    println!();
    println!("Cycle log written to {:?}", sink.path());
    println!("Demo complete!");
}
