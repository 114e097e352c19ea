//! End-to-end tests for the debounce -> segmentation -> sink pipeline.

use chrono::{DateTime, Duration, TimeZone, Utc};
use treadmill_log::core::{CycleSegmenter, CycleSummary, DebounceFilter};
use treadmill_log::sink::{FileLogSink, SummarySink};

/// Sink that keeps summaries in memory for inspection.
#[derive(Default)]
struct MemorySink {
    summaries: Vec<CycleSummary>,
}

impl SummarySink for MemorySink {
    fn record(&mut self, summary: &CycleSummary) -> std::io::Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Feed a stream of offsets (in milliseconds) through the full pipeline.
fn run_pipeline(offsets_ms: &[i64], sink: &mut dyn SummarySink) -> (CycleSegmenter, u32) {
    let mut filter = DebounceFilter::new(std::time::Duration::from_secs(1));
    let mut segmenter = CycleSegmenter::new(10, 1.0);
    let mut debounced = 0;

    for &offset in offsets_ms {
        let t = base() + Duration::milliseconds(offset);
        if !filter.accept(t).is_accepted() {
            debounced += 1;
            continue;
        }
        if let Some(summary) = segmenter.process_trigger(t) {
            sink.record(&summary).expect("sink write");
        }
    }

    (segmenter, debounced)
}

#[test]
fn test_full_scenario() {
    // Triggers at 0, 2, 4, 6, 8, 10.3, 10.6, 22.6 seconds:
    // - 0 bootstraps the first cycle
    // - 2..8 accumulate four revolutions
    // - 10.3 closes the cycle and bootstraps the next one
    // - 10.6 is a double-trigger and gets debounced
    // - 22.6 closes an empty cycle, so it only re-bootstraps
    let offsets = [0, 2_000, 4_000, 6_000, 8_000, 10_300, 10_600, 22_600];
    let mut sink = MemorySink::default();
    let (segmenter, debounced) = run_pipeline(&offsets, &mut sink);

    assert_eq!(debounced, 1);
    assert_eq!(sink.summaries.len(), 1);

    let summary = &sink.summaries[0];
    assert_eq!(summary.start_time, base());
    assert_eq!(summary.end_time, base() + Duration::milliseconds(10_300));
    assert_eq!(summary.trigger_count, 4);

    let expected_distance = 4.0 * std::f64::consts::PI / 1000.0;
    assert!((summary.distance_km - expected_distance).abs() < 1e-6);
    assert!((summary.distance_km - 0.01257).abs() < 1e-5);

    let expected_speed = expected_distance * 3600.0 / 10.3;
    assert!((summary.speed_kmh - expected_speed).abs() < 1e-6);

    // The 22.6s trigger bootstrapped a fresh cycle.
    let cycle = segmenter.current_cycle().expect("open cycle");
    assert_eq!(cycle.start_time, base() + Duration::milliseconds(22_600));
    assert_eq!(cycle.trigger_count, 0);
}

#[test]
fn test_no_summary_before_interval() {
    let offsets = [0, 2_000, 4_000, 6_000, 8_000];
    let mut sink = MemorySink::default();
    let (segmenter, _) = run_pipeline(&offsets, &mut sink);

    assert!(sink.summaries.is_empty());
    assert_eq!(segmenter.current_cycle().unwrap().trigger_count, 4);
}

#[test]
fn test_debounced_trigger_never_reaches_segmenter() {
    // 0 bootstraps, 500ms is debounced: the cycle count stays at zero and
    // last_trigger_time stays at the bootstrap.
    let offsets = [0, 500];
    let mut sink = MemorySink::default();
    let (segmenter, debounced) = run_pipeline(&offsets, &mut sink);

    assert_eq!(debounced, 1);
    let cycle = segmenter.current_cycle().unwrap();
    assert_eq!(cycle.trigger_count, 0);
    assert_eq!(cycle.last_trigger_time, base());
}

#[test]
fn test_back_to_back_cycles() {
    // Two full runs separated by a close: the closing trigger of the first
    // cycle starts the second, and the second closes on its own trigger.
    let offsets = [
        0, 2_000, 4_000, 6_000, 8_000, // first cycle, 4 revolutions
        11_000, // closes first, bootstraps second
        13_000, 15_000, 17_000, // second cycle, 3 revolutions
        21_500, // closes second (>= 10s after 11s)
    ];
    let mut sink = MemorySink::default();
    let (_, debounced) = run_pipeline(&offsets, &mut sink);

    assert_eq!(debounced, 0);
    assert_eq!(sink.summaries.len(), 2);

    assert_eq!(sink.summaries[0].trigger_count, 4);
    assert_eq!(sink.summaries[0].end_time, base() + Duration::seconds(11));

    assert_eq!(sink.summaries[1].trigger_count, 3);
    assert_eq!(sink.summaries[1].start_time, base() + Duration::seconds(11));
    assert_eq!(
        sink.summaries[1].end_time,
        base() + Duration::milliseconds(21_500)
    );
}

#[test]
fn test_file_sink_end_to_end() {
    let path = std::env::temp_dir().join(format!(
        "treadmill-log-pipeline-test-{}.txt",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let offsets = [0, 2_000, 4_000, 6_000, 8_000, 10_300];
    let mut sink = FileLogSink::new(path.clone());
    run_pipeline(&offsets, &mut sink);

    let content = std::fs::read_to_string(&path).expect("log file written");
    assert!(content.starts_with("Start time: "));
    assert!(content.contains("Distance: 0.01 kilometers"));
    assert!(content.contains("kilometers/hour"));
    assert!(content.ends_with("\n\n"));

    let _ = std::fs::remove_file(&path);
}
