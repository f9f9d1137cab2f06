//! # Duplicate Note Report
//!
//! Joins overlap detection with bar lookup: every overlapping lane range in a
//! chart is located as "bar N, tick offset T" for display.
//!
//! ## Output
//! ```text
//! 7 location(s) with duplicated short notes.
//! Bar 1 (tick 0, lane 3)
//! Bar 2 (tick 480, lane 4-7)
//! ...
//! 2 more omitted.
//! ```
//! Bars are shown 1-based. At most `max_report_entries` locations are listed;
//! the full list stays available through [`DuplicateReport::entries`].

use std::fmt;

use crate::chart::Chart;
use crate::config::CheckOptions;
use crate::error::ChartError;
use crate::overlap::detect_overlaps;
use crate::timeline::TimeSignatureTimeline;

/// One overlapping lane range with its bar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateLocation {
    pub tick: u32,
    /// 0-based bar index.
    pub bar_index: u32,
    pub tick_offset: u32,
    pub lane_index: u32,
    pub width: u32,
}

impl fmt::Display for DuplicateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bar {} (tick {}, lane {}",
            self.bar_index + 1,
            self.tick_offset,
            self.lane_index
        )?;
        if self.width > 1 {
            write!(f, "-{}", self.lane_index + self.width - 1)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateReport {
    entries: Vec<DuplicateLocation>,
    max_entries: usize,
}

impl DuplicateReport {
    pub fn new(entries: Vec<DuplicateLocation>, max_entries: usize) -> Self {
        Self {
            entries,
            max_entries,
        }
    }

    pub fn entries(&self) -> &[DuplicateLocation] {
        &self.entries
    }

    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Locations left out of the rendered report.
    pub fn omitted(&self) -> usize {
        self.entries.len().saturating_sub(self.max_entries)
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No duplicated short notes.");
        }

        writeln!(
            f,
            "{} location(s) with duplicated short notes.",
            self.entries.len()
        )?;
        for entry in self.entries.iter().take(self.max_entries) {
            writeln!(f, "{}", entry)?;
        }
        if self.omitted() > 0 {
            writeln!(f, "{} more omitted.", self.omitted())?;
        }
        Ok(())
    }
}

/// Find every duplicated short note location in `chart`.
///
/// Charts without time signature events are located as if in 4/4.
///
/// # Errors
/// Propagates [`ChartError`] from option validation, timeline construction and
/// overlap detection; no partial report is produced.
pub fn check_duplicates(chart: &Chart, options: &CheckOptions) -> Result<DuplicateReport, ChartError> {
    options.validate()?;

    let overlaps = detect_overlaps(&chart.short_notes(), options.lanes_count)?;
    let timeline =
        TimeSignatureTimeline::new(chart.ticks_per_beat, &chart.effective_time_signatures())?;

    let entries = overlaps
        .iter()
        .map(|overlap| {
            let pos = timeline.bar_position_from_tick(overlap.tick)?;
            Ok(DuplicateLocation {
                tick: overlap.tick,
                bar_index: pos.bar_index,
                tick_offset: pos.tick_offset,
                lane_index: overlap.lane_index,
                width: overlap.width,
            })
        })
        .collect::<Result<Vec<_>, ChartError>>()?;

    if entries.len() > options.max_report_entries {
        log::warn!(
            "{} duplicate locations found, report lists the first {}",
            entries.len(),
            options.max_report_entries
        );
    }

    Ok(DuplicateReport::new(entries, options.max_report_entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{DamageNote, TapNote, TimeSignatureChangeEvent};

    fn location(bar_index: u32, tick_offset: u32, lane_index: u32, width: u32) -> DuplicateLocation {
        DuplicateLocation {
            tick: 0,
            bar_index,
            tick_offset,
            lane_index,
            width,
        }
    }

    #[test]
    fn test_location_display() {
        assert_eq!(location(0, 0, 3, 1).to_string(), "Bar 1 (tick 0, lane 3)");
        assert_eq!(location(4, 480, 4, 4).to_string(), "Bar 5 (tick 480, lane 4-7)");
    }

    #[test]
    fn test_clean_report() {
        let report = DuplicateReport::new(vec![], 5);
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "No duplicated short notes.\n");
    }

    #[test]
    fn test_report_truncates_after_cap() {
        let entries: Vec<_> = (0..7).map(|i| location(i, 0, 0, 1)).collect();
        let report = DuplicateReport::new(entries, 5);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(report.omitted(), 2);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "7 location(s) with duplicated short notes.");
        assert_eq!(lines[5], "Bar 5 (tick 0, lane 0)");
        assert_eq!(lines[6], "2 more omitted.");
    }

    #[test]
    fn test_report_at_cap_has_no_summary() {
        let entries: Vec<_> = (0..5).map(|i| location(i, 0, 0, 1)).collect();
        let report = DuplicateReport::new(entries, 5);
        assert_eq!(report.omitted(), 0);
        assert!(!report.to_string().contains("omitted"));
    }

    #[test]
    fn test_check_duplicates_locates_bars() {
        let mut chart = Chart::new(480);
        chart.time_signatures = vec![
            TimeSignatureChangeEvent::new(0, 4, 4),
            TimeSignatureChangeEvent::new(3840, 3, 4),
        ];
        chart.notes.taps.push(TapNote::new(5280 + 240, 2, 2));
        chart.notes.flicks.push(TapNote::new(5280 + 240, 3, 2));
        chart.notes.taps.push(TapNote::new(100, 0, 1));
        chart.notes.damages.push(DamageNote {
            tick: 100,
            lane_index: 0,
            width: 1,
        });

        let report = check_duplicates(&chart, &CheckOptions::default()).unwrap();
        assert_eq!(
            report.entries(),
            &[
                DuplicateLocation {
                    tick: 100,
                    bar_index: 0,
                    tick_offset: 100,
                    lane_index: 0,
                    width: 1,
                },
                DuplicateLocation {
                    tick: 5520,
                    bar_index: 3,
                    tick_offset: 240,
                    lane_index: 3,
                    width: 1,
                },
            ]
        );
    }

    #[test]
    fn test_check_duplicates_without_time_signatures() {
        let mut chart = Chart::new(480);
        chart.notes.ex_taps.push(TapNote::new(1920, 0, 4));
        chart.notes.ex_taps.push(TapNote::new(1920, 0, 4));

        let report = check_duplicates(&chart, &CheckOptions::default()).unwrap();
        assert_eq!(report.entries()[0].bar_index, 1);
        assert_eq!(report.entries()[0].to_string(), "Bar 2 (tick 0, lane 0-3)");
    }

    #[test]
    fn test_check_duplicates_propagates_invalid_resolution() {
        let mut chart = Chart::new(0);
        chart.notes.taps.push(TapNote::new(0, 0, 1));
        assert_eq!(
            check_duplicates(&chart, &CheckOptions::default()),
            Err(ChartError::InvalidResolution { ticks_per_beat: 0 })
        );
    }
}
