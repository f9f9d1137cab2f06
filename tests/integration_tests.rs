//! Integration tests for chartcheck
//!
//! Drives YAML charts through parsing, duplicate checking, bar lookup and splitting.

use chartcheck::{
    check_source, locate_tick, parse_chart, split_source, BarPosition, ChartError, CheckOptions,
};

const CHART: &str = r#"
ticks-per-beat: 480
time-signatures:
  - { tick: 0, numerator: 4, denominator: 4 }
  - { tick: 3840, numerator: 3, denominator: 4 }
notes:
  taps:
    - { tick: 100, lane-index: 5, width: 1 }
    - { tick: 3840, lane-index: 0, width: 2 }
  ex-taps:
    - { tick: 100, lane-index: 5, width: 1 }
  flicks:
    - { tick: 3840, lane-index: 1, width: 2 }
  damages:
    - { tick: 4000, lane-index: 8, width: 4 }
  holds:
    - { start-tick: 100, duration: 960, lane-index: 5, width: 1 }
"#;

#[test]
fn test_check_reports_duplicates_with_bar_positions() {
    let report = check_source(CHART, &CheckOptions::default()).unwrap();
    let lines: Vec<String> = report.entries().iter().map(|e| e.to_string()).collect();

    // The hold on lane 5 is not a short note and does not count
    assert_eq!(lines, vec!["Bar 1 (tick 100, lane 5)", "Bar 3 (tick 0, lane 1)"]);
    assert!(report.to_string().starts_with("2 location(s) with duplicated short notes."));
}

#[test]
fn test_clean_chart() {
    let source = r#"
ticks-per-beat: 480
notes:
  taps:
    - { tick: 0, lane-index: 0, width: 4 }
    - { tick: 0, lane-index: 4, width: 4 }
    - { tick: 480, lane-index: 0, width: 4 }
"#;
    let report = check_source(source, &CheckOptions::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.to_string(), "No duplicated short notes.\n");
}

#[test]
fn test_report_cap_is_configurable() {
    let mut source = String::from("ticks-per-beat: 480\nnotes:\n  taps:\n");
    for bar in 0..4 {
        for _ in 0..2 {
            source.push_str(&format!("    - {{ tick: {}, lane-index: 0, width: 1 }}\n", bar * 1920));
        }
    }

    let options = CheckOptions {
        max_report_entries: 2,
        ..CheckOptions::default()
    };
    let report = check_source(&source, &options).unwrap();
    let text = report.to_string();

    assert_eq!(report.entries().len(), 4);
    assert!(text.contains("Bar 2 (tick 0, lane 0)"));
    assert!(!text.contains("Bar 3"));
    assert!(text.ends_with("2 more omitted.\n"));
}

#[test]
fn test_narrow_lane_axis_rejects_wide_note() {
    let options = CheckOptions {
        lanes_count: 8,
        ..CheckOptions::default()
    };
    let result = check_source(CHART, &options);
    assert!(matches!(
        result,
        Err(ChartError::InvalidNote { tick: 4000, lane_index: 8, .. })
    ));
}

#[test]
fn test_oversized_lane_count_is_an_error() {
    let options = CheckOptions {
        lanes_count: usize::MAX,
        ..CheckOptions::default()
    };
    assert!(matches!(
        check_source(CHART, &options),
        Err(ChartError::FormatError(_))
    ));
}

#[test]
fn test_zero_resolution_chart() {
    let source = "ticks-per-beat: 0\n";
    assert_eq!(
        check_source(source, &CheckOptions::default()),
        Err(ChartError::InvalidResolution { ticks_per_beat: 0 })
    );
    assert_eq!(
        locate_tick(source, 0),
        Err(ChartError::InvalidResolution { ticks_per_beat: 0 })
    );
}

#[test]
fn test_locate_tick() {
    assert_eq!(locate_tick(CHART, 2400).unwrap(), BarPosition::new(1, 480));
    assert_eq!(locate_tick(CHART, 5280).unwrap(), BarPosition::new(3, 0));
}

#[test]
fn test_invalid_time_signature_fails_check() {
    let source = r#"
ticks-per-beat: 480
time-signatures:
  - { tick: 0, numerator: 4, denominator: 0 }
"#;
    assert!(matches!(
        check_source(source, &CheckOptions::default()),
        Err(ChartError::InvalidTimeSignature { denominator: 0, .. })
    ));
}

#[test]
fn test_split_removes_partial_overlaps() {
    let yaml = split_source(CHART).unwrap();
    let chart = parse_chart(&yaml).unwrap();

    assert!(chart.notes.taps.iter().all(|t| t.width == 1));
    assert_eq!(chart.notes.taps.len(), 3);
    assert_eq!(chart.notes.flicks[0].width, 2);
    assert_eq!(chart.notes.damages[0].width, 4);

    // Splitting does not create or remove collisions between short notes
    let report = check_source(&yaml, &CheckOptions::default()).unwrap();
    assert_eq!(report.entries().len(), 2);
}
