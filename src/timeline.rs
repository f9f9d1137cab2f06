//! # Time Signature Timeline
//!
//! Maps absolute ticks to bar positions under a piecewise-constant sequence of
//! time signatures.
//!
//! ## Segment Construction
//! Events are sorted by tick (stable, so input order breaks ties). Walking
//! them in order, each event opens a segment at the running bar-start `pos`.
//! The distance to the next event's tick is divided into whole bars of the
//! current signature; `pos` and the bar index advance by that many bars only.
//! Any remainder is dropped, so the next segment opens on the last whole-bar
//! boundary at or before the next event's tick.
//!
//! ```text
//! ticks_per_beat = 480, events: 4/4 @ 0, 3/4 @ 2000
//!
//! bar:   0          1
//! tick:  0 ------- 1920 ---- 3360 ---- ...
//!        [ 4/4    )[ 3/4   )[ 3/4  ...
//!                  ^ 2000 - 0 = 2000 ticks, 1 whole bar of 1920
//! ```
//!
//! Events that land on the same `pos` collapse into one segment and the last
//! one processed wins. This truncation is what existing charts were authored
//! against and must not be corrected to exact rational alignment.
//!
//! ## Lookup
//! Segments are kept ascending by start tick; both start ticks and start bar
//! indices are strictly increasing, so queries binary-search for the latest
//! segment starting at or before the query point.

use std::collections::BTreeMap;

use crate::chart::{TimeSignature, TimeSignatureChangeEvent};
use crate::error::{ChartError, SegmentQuery};

/// Beats in the reference bar used to derive bar lengths.
const REFERENCE_BEATS: u32 = 4;

/// A maximal tick range governed by one time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignatureSegment {
    pub start_tick: u32,
    /// 0-based index of the bar starting at `start_tick`.
    pub start_bar_index: u32,
    pub signature: TimeSignature,
}

/// A bar index (0-based) and the tick offset inside that bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarPosition {
    pub bar_index: u32,
    pub tick_offset: u32,
}

impl BarPosition {
    pub fn new(bar_index: u32, tick_offset: u32) -> Self {
        Self {
            bar_index,
            tick_offset,
        }
    }
}

/// Read-only lookup structure built from a chart's time signature events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSignatureTimeline {
    ticks_per_beat: u32,
    bar_ticks: u32,
    segments: Vec<TimeSignatureSegment>,
}

impl TimeSignatureTimeline {
    /// Build a timeline from a resolution and an unordered list of events.
    ///
    /// # Errors
    /// - [`ChartError::InvalidResolution`] if `ticks_per_beat` is 0 (or too large
    ///   for a reference bar to fit in a `u32`)
    /// - [`ChartError::InvalidTimeSignature`] if any event has a zero numerator or
    ///   denominator, or a bar length that truncates to 0 ticks or exceeds `u32`
    ///
    /// An empty event list yields an empty timeline whose queries all fail with
    /// [`ChartError::NoMatchingSegment`].
    pub fn new(
        ticks_per_beat: u32,
        events: &[TimeSignatureChangeEvent],
    ) -> Result<Self, ChartError> {
        let bar_ticks = ticks_per_beat
            .checked_mul(REFERENCE_BEATS)
            .filter(|_| ticks_per_beat > 0)
            .ok_or(ChartError::InvalidResolution { ticks_per_beat })?;

        for event in events {
            if event.numerator == 0 || event.signature().bar_length(bar_ticks) == 0 {
                return Err(ChartError::InvalidTimeSignature {
                    tick: event.tick,
                    numerator: event.numerator,
                    denominator: event.denominator,
                });
            }
        }

        let mut ordered = events.to_vec();
        ordered.sort_by_key(|e| e.tick);

        let mut by_start: BTreeMap<u32, TimeSignatureSegment> = BTreeMap::new();
        let mut pos: u32 = 0;
        let mut bar_index: u32 = 0;

        for (i, event) in ordered.iter().enumerate() {
            by_start.insert(
                pos,
                TimeSignatureSegment {
                    start_tick: pos,
                    start_bar_index: bar_index,
                    signature: event.signature(),
                },
            );

            if let Some(next) = ordered.get(i + 1) {
                let bar_length = event.signature().bar_length(bar_ticks);
                // pos never passes the next event's tick
                let duration = next.tick - pos;
                let whole_bars = duration / bar_length;
                pos += whole_bars * bar_length;
                bar_index += whole_bars;
            }
        }

        let segments: Vec<TimeSignatureSegment> = by_start.into_values().collect();
        log::debug!(
            "Built timeline: {} events -> {} segments (ticks per beat {})",
            events.len(),
            segments.len(),
            ticks_per_beat
        );
        for segment in &segments {
            log::trace!(
                "  segment {} from tick {} (bar {})",
                segment.signature,
                segment.start_tick,
                segment.start_bar_index
            );
        }

        Ok(Self {
            ticks_per_beat,
            bar_ticks,
            segments,
        })
    }

    pub fn ticks_per_beat(&self) -> u32 {
        self.ticks_per_beat
    }

    /// Tick length of a 4-beat reference bar.
    pub fn bar_ticks(&self) -> u32 {
        self.bar_ticks
    }

    /// Segments in ascending start order.
    pub fn segments(&self) -> &[TimeSignatureSegment] {
        &self.segments
    }

    /// The segment governing `tick`.
    pub fn segment_at_tick(&self, tick: u32) -> Result<&TimeSignatureSegment, ChartError> {
        let idx = self.segments.partition_point(|s| s.start_tick <= tick);
        idx.checked_sub(1)
            .map(|i| &self.segments[i])
            .ok_or(ChartError::NoMatchingSegment {
                query: SegmentQuery::Tick(tick),
            })
    }

    /// Bar index and in-bar offset of `tick`.
    ///
    /// # Example
    /// ```
    /// use chartcheck::{BarPosition, TimeSignatureChangeEvent, TimeSignatureTimeline};
    ///
    /// let events = [TimeSignatureChangeEvent::new(0, 4, 4)];
    /// let timeline = TimeSignatureTimeline::new(480, &events)?;
    /// assert_eq!(timeline.bar_position_from_tick(2400)?, BarPosition::new(1, 480));
    /// # Ok::<(), chartcheck::ChartError>(())
    /// ```
    pub fn bar_position_from_tick(&self, tick: u32) -> Result<BarPosition, ChartError> {
        let segment = self.segment_at_tick(tick)?;
        let bar_length = segment.signature.bar_length(self.bar_ticks);
        let ticks_from_segment = tick - segment.start_tick;
        let whole_bars = ticks_from_segment / bar_length;

        Ok(BarPosition {
            bar_index: segment.start_bar_index + whole_bars,
            tick_offset: ticks_from_segment - whole_bars * bar_length,
        })
    }

    /// Time signature governing the bar at `bar_index`.
    pub fn time_signature_from_bar_index(&self, bar_index: u32) -> Result<TimeSignature, ChartError> {
        let idx = self
            .segments
            .partition_point(|s| s.start_bar_index <= bar_index);
        idx.checked_sub(1)
            .map(|i| self.segments[i].signature)
            .ok_or(ChartError::NoMatchingSegment {
                query: SegmentQuery::BarIndex(bar_index),
            })
    }
}
