//! # Error Types
//!
//! All errors raised while building a timeline, scanning notes for overlaps,
//! or loading a chart file.
//!
//! None of these are recoverable by retrying: they mean the input was malformed
//! or a caller broke a precondition, and the operation produced no output.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// The chart resolution must be at least one tick per beat.
    ///
    /// # Example
    /// ```
    /// # use chartcheck::ChartError;
    /// let err = ChartError::InvalidResolution { ticks_per_beat: 0 };
    /// assert_eq!(err.to_string(), "Invalid resolution: ticks per beat must be positive, got 0");
    /// ```
    #[error("Invalid resolution: ticks per beat must be positive, got {ticks_per_beat}")]
    InvalidResolution { ticks_per_beat: u32 },

    /// A time signature whose bar would be zero ticks long.
    #[error("Invalid time signature {numerator}/{denominator} at tick {tick}")]
    InvalidTimeSignature {
        tick: u32,
        numerator: u32,
        denominator: u32,
    },

    /// A tick or bar query fell before every known segment.
    ///
    /// Only reachable when the timeline has no segment starting at tick 0,
    /// i.e. it was built from an empty event list.
    ///
    /// # Example
    /// ```
    /// # use chartcheck::{ChartError, SegmentQuery};
    /// let err = ChartError::NoMatchingSegment { query: SegmentQuery::Tick(960) };
    /// assert_eq!(err.to_string(), "No time signature segment covers tick 960");
    /// ```
    #[error("No time signature segment covers {query}")]
    NoMatchingSegment { query: SegmentQuery },

    /// A note whose lane range does not fit on the lane axis.
    #[error("Invalid note at tick {tick} (lane {lane_index}, width {width}): {reason}")]
    InvalidNote {
        tick: u32,
        lane_index: u32,
        width: u32,
        reason: String,
    },

    /// A lane axis the detector cannot index: zero lanes, or more lanes than a
    /// `u32` lane index can address.
    #[error("Invalid lane count {lanes_count}")]
    InvalidLaneCount { lanes_count: usize },

    /// Malformed chart file or option value.
    #[error("Invalid chart format: {0}")]
    FormatError(String),
}

/// What a failed segment lookup was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentQuery {
    Tick(u32),
    BarIndex(u32),
}

impl std::fmt::Display for SegmentQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentQuery::Tick(tick) => write!(f, "tick {}", tick),
            SegmentQuery::BarIndex(bar) => write!(f, "bar index {}", bar),
        }
    }
}
