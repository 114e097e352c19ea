//! Treadmill Log CLI
//!
//! Records treadmill wheel rotations into a cycle log.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use treadmill_log::{
    config::Config,
    core::{CycleSegmenter, DebounceFilter, Decision},
    sink::{FileLogSink, SummarySink},
    source::{ScriptedSource, StdinSource, TriggerEvent},
    stats::create_shared_stats_with_persistence,
    VERSION,
};

#[derive(Parser)]
#[command(name = "treadmill-log")]
#[command(version = VERSION)]
#[command(about = "Treadmill wheel rotation logger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start recording wheel triggers
    Start {
        /// Replay the built-in demo schedule instead of reading stdin
        #[arg(long)]
        simulate: bool,

        /// Override the cycle log path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show configuration and cumulative statistics
    Status,

    /// Show configuration
    Config,
}

/// The trigger source selected for this run.
enum Source {
    Stdin(StdinSource),
    Script(ScriptedSource),
}

impl Source {
    fn start(&mut self) -> Result<(), treadmill_log::source::SourceError> {
        match self {
            Source::Stdin(s) => s.start(),
            Source::Script(s) => s.start(),
        }
    }

    fn stop(&mut self) {
        match self {
            Source::Stdin(s) => s.stop(),
            Source::Script(s) => s.stop(),
        }
    }

    fn receiver(&self) -> &crossbeam_channel::Receiver<TriggerEvent> {
        match self {
            Source::Stdin(s) => s.receiver(),
            Source::Script(s) => s.receiver(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { simulate, output } => {
            cmd_start(simulate, output);
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_start(simulate: bool, output: Option<PathBuf>) {
    println!("Treadmill Log v{VERSION}");
    println!();

    // Load or create configuration
    let mut config = Config::load().unwrap_or_default();
    if let Some(path) = output {
        config.log_path = path;
    }
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    println!("Starting recording...");
    println!("  Wheel diameter: {} m", config.wheel_diameter_m);
    println!("  Cycle interval: {}s", config.cycle_interval_secs);
    println!(
        "  Debounce threshold: {}ms",
        config.debounce_threshold_ms
    );
    println!("  Log file: {:?}", config.log_path);
    if simulate {
        println!("  Source: built-in demo schedule");
    } else {
        println!("  Source: stdin (one trigger per line)");
    }
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    // Set up session stats
    let stats = create_shared_stats_with_persistence(config.data_path.join("stats.json"));

    // Create the pipeline
    let mut filter = DebounceFilter::new(config.debounce_threshold());
    let mut segmenter = CycleSegmenter::new(config.cycle_interval_secs, config.wheel_diameter_m);
    let mut sink = FileLogSink::new(config.log_path.clone());

    // Create and start the trigger source
    let mut source = if simulate {
        Source::Script(ScriptedSource::demo_run())
    } else {
        Source::Stdin(StdinSource::new())
    };
    if let Err(e) = source.start() {
        eprintln!("Error starting trigger source: {e}");
        std::process::exit(1);
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc_handler(r);

    // Main event loop. The timeout only keeps Ctrl+C responsive: a cycle
    // closes on the next trigger, never on elapsed time alone.
    let receiver = source.receiver().clone();

    while running.load(Ordering::SeqCst) {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                stats.record_trigger();
                process_trigger(event, &mut filter, &mut segmenter, &mut sink, &stats);
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                println!();
                println!("Trigger source ended.");
                break;
            }
        }
    }

    // Stop recording. An open cycle is dropped, not flushed: without a
    // closing trigger its end time is unknown.
    println!();
    println!("Stopping recording...");
    source.stop();

    if let Some(cycle) = segmenter.current_cycle() {
        println!(
            "Open cycle with {} counted trigger(s) since {} was not recorded.",
            cycle.trigger_count,
            cycle
                .start_time
                .with_timezone(&Local)
                .format("%H:%M:%S")
        );
    }

    // Save session stats
    if let Err(e) = stats.save() {
        eprintln!("Warning: Could not save session stats: {e}");
    }

    // Final stats
    println!();
    println!("{}", stats.summary());
}

/// Run one trigger through debounce, segmentation, and the log sink.
fn process_trigger(
    event: TriggerEvent,
    filter: &mut DebounceFilter,
    segmenter: &mut CycleSegmenter,
    sink: &mut FileLogSink,
    stats: &treadmill_log::SharedSessionStats,
) {
    let timestamp = event.timestamp;
    println!(
        "[{}] sensor trigger",
        timestamp.with_timezone(&Local).format("%H:%M:%S%.3f")
    );

    match filter.accept(timestamp) {
        Decision::Debounced => {
            stats.record_debounced();
            println!("Ignoring trigger too soon after the previous one.");
        }
        Decision::Accepted => {
            stats.record_accepted();
            if let Some(summary) = segmenter.process_trigger(timestamp) {
                println!(
                    "[{}] Cycle closed: {} revolution(s), {:.2} km at {:.2} km/h",
                    summary.end_time.with_timezone(&Local).format("%H:%M:%S"),
                    summary.trigger_count,
                    summary.distance_km,
                    summary.speed_kmh
                );

                // A failed write loses this summary; the next cycle is
                // already under way and proceeds regardless.
                match sink.record(&summary) {
                    Ok(()) => stats.record_cycle(),
                    Err(e) => eprintln!("Error writing cycle summary: {e}"),
                }
            }
        }
    }
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("Treadmill Log Status");
    println!("====================");
    println!();

    println!("Configuration:");
    println!("  Wheel diameter: {} m", config.wheel_diameter_m);
    println!("  Cycle interval: {}s", config.cycle_interval_secs);
    println!(
        "  Debounce threshold: {}ms",
        config.debounce_threshold_ms
    );
    println!("  Log file: {:?}", config.log_path);
    println!();

    // Load and show cumulative stats if available
    let stats_path = config.data_path.join("stats.json");
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(observed) = stats.get("triggers_observed") {
                    println!("  Triggers observed: {observed}");
                }
                if let Some(accepted) = stats.get("triggers_accepted") {
                    println!("  Triggers accepted: {accepted}");
                }
                if let Some(debounced) = stats.get("triggers_debounced") {
                    println!("  Triggers debounced: {debounced}");
                }
                if let Some(cycles) = stats.get("cycles_recorded") {
                    println!("  Cycles recorded: {cycles}");
                }
            }
        }
    } else {
        println!("No previous session data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
}
