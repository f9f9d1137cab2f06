//! # Lane Overlap Detection
//!
//! Finds lanes covered by two or more short notes on the same tick.
//!
//! Notes are grouped by tick. Each group is counted with a difference array
//! over the lanes it reaches: `+1` at a note's first lane, `-1` one past its
//! last lane. A prefix sum turns that into per-lane coverage, and every maximal run
//! of lanes with coverage above 1 becomes one [`OverlapRange`].
//!
//! ```text
//! lanes:      0  1  2  3
//! note A:    [====]           lane 0, width 2
//! note B:       [====]        lane 1, width 2
//! coverage:   1  2  1  0   -> OverlapRange { lane_index: 1, width: 1 }
//! ```

use std::collections::BTreeMap;

use crate::chart::ShortNote;
use crate::config::MAX_LANES_COUNT;
use crate::error::ChartError;

/// Lanes `[lane_index, lane_index + width - 1]` at `tick` covered more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OverlapRange {
    pub tick: u32,
    pub lane_index: u32,
    pub width: u32,
}

/// Detect every overlapping lane range, ordered by tick then lane.
///
/// All notes are validated before any counting happens, so an invalid note
/// fails the whole call.
///
/// # Errors
/// - [`ChartError::InvalidLaneCount`] if `lanes_count` is 0 or above
///   [`MAX_LANES_COUNT`]
/// - [`ChartError::InvalidNote`] if a note has width 0 or does not fit inside
///   `0..lanes_count`
///
/// # Example
/// ```
/// use chartcheck::{detect_overlaps, OverlapRange, ShortNote, ShortNoteKind};
///
/// let notes = [
///     ShortNote::new(ShortNoteKind::Tap, 0, 0, 2),
///     ShortNote::new(ShortNoteKind::Flick, 0, 1, 2),
/// ];
/// let overlaps = detect_overlaps(&notes, 16)?;
/// assert_eq!(overlaps, vec![OverlapRange { tick: 0, lane_index: 1, width: 1 }]);
/// # Ok::<(), chartcheck::ChartError>(())
/// ```
pub fn detect_overlaps<'a, I>(notes: I, lanes_count: usize) -> Result<Vec<OverlapRange>, ChartError>
where
    I: IntoIterator<Item = &'a ShortNote>,
{
    if lanes_count == 0 || lanes_count > MAX_LANES_COUNT || lanes_count.checked_add(1).is_none() {
        return Err(ChartError::InvalidLaneCount { lanes_count });
    }

    let mut groups: BTreeMap<u32, Vec<&ShortNote>> = BTreeMap::new();
    for note in notes {
        validate_note(note, lanes_count)?;
        groups.entry(note.tick).or_default().push(note);
    }

    let mut overlaps: Vec<OverlapRange> = groups
        .iter()
        .flat_map(|(tick, group)| overlaps_in_group(*tick, group))
        .collect();
    overlaps.sort();

    log::debug!(
        "Scanned {} ticks over {} lanes, found {} overlapping ranges",
        groups.len(),
        lanes_count,
        overlaps.len()
    );

    Ok(overlaps)
}

fn validate_note(note: &ShortNote, lanes_count: usize) -> Result<(), ChartError> {
    let invalid = |reason: String| ChartError::InvalidNote {
        tick: note.tick,
        lane_index: note.lane_index,
        width: note.width,
        reason,
    };

    if note.width == 0 {
        return Err(invalid("width must be at least 1".to_string()));
    }
    let lane = note.lane_index as usize;
    if lane >= lanes_count {
        return Err(invalid(format!(
            "lane index outside 0..{}",
            lanes_count
        )));
    }
    if lane.saturating_add(note.width as usize) > lanes_count {
        return Err(invalid(format!(
            "lane range ends past the last lane ({})",
            lanes_count - 1
        )));
    }
    Ok(())
}

/// Overlapping runs for notes that all share `tick`, ascending by lane.
///
/// Only lanes up to the group's rightmost covered lane are counted; coverage
/// past it is zero.
fn overlaps_in_group(tick: u32, group: &[&ShortNote]) -> Vec<OverlapRange> {
    let extent = group
        .iter()
        .map(|n| n.lane_index as usize + n.width as usize)
        .max()
        .unwrap_or(0);

    let mut coverage = vec![0i32; extent + 1];
    for note in group {
        let start = note.lane_index as usize;
        coverage[start] += 1;
        coverage[start + note.width as usize] -= 1;
    }
    for i in 1..extent {
        coverage[i] += coverage[i - 1];
    }

    let mut results = Vec::new();
    let mut i = 0;
    while i < extent {
        if coverage[i] <= 1 {
            i += 1;
            continue;
        }
        let begin = i;
        while i < extent && coverage[i] > 1 {
            i += 1;
        }
        results.push(OverlapRange {
            tick,
            lane_index: begin as u32,
            width: (i - begin) as u32,
        });
    }
    results
}
