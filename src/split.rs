//! # Wide Note Splitting
//!
//! Produces a copy of a chart where wide notes are broken into narrow ones.
//!
//! | Kind           | Result                                                  |
//! |----------------|---------------------------------------------------------|
//! | tap, ex-tap    | width-1 notes on every covered lane                     |
//! | flick (w >= 2) | width-2 notes every 2 lanes; an odd last lane is dropped |
//! | hold           | width-1 holds with the same start and duration          |
//! | slide          | width-1 slides, only if no step changes width           |
//! | damage         | unchanged                                               |
//!
//! The original note keeps its lane and shrinks; new pieces are appended after
//! the existing notes of the same kind and copy the original's air and
//! air action.

use crate::chart::{Chart, Hold, Slide, TapNote};

/// Split every wide note in `chart`. The input chart is not modified.
pub fn split_chart(chart: &Chart) -> Chart {
    let mut result = chart.clone();
    let notes = &mut result.notes;

    split_taps(&mut notes.taps);
    split_taps(&mut notes.ex_taps);
    split_flicks(&mut notes.flicks);
    split_holds(&mut notes.holds);
    split_slides(&mut notes.slides);

    log::debug!(
        "Split chart: {} taps, {} ex-taps, {} flicks, {} holds, {} slides",
        notes.taps.len(),
        notes.ex_taps.len(),
        notes.flicks.len(),
        notes.holds.len(),
        notes.slides.len()
    );

    result
}

fn split_taps(taps: &mut Vec<TapNote>) {
    let mut pieces = Vec::new();
    for tap in taps.iter_mut() {
        pieces.extend((1..tap.width).map(|p| TapNote {
            lane_index: tap.lane_index + p,
            width: 1,
            ..tap.clone()
        }));
        tap.width = 1;
    }
    taps.extend(pieces);
}

fn split_flicks(flicks: &mut Vec<TapNote>) {
    let mut pieces = Vec::new();
    for flick in flicks.iter_mut().filter(|f| f.width >= 2) {
        pieces.extend((1..flick.width / 2).map(|p| TapNote {
            lane_index: flick.lane_index + 2 * p,
            width: 2,
            ..flick.clone()
        }));
        flick.width = 2;
    }
    flicks.extend(pieces);
}

fn split_holds(holds: &mut Vec<Hold>) {
    let mut pieces = Vec::new();
    for hold in holds.iter_mut() {
        pieces.extend((1..hold.width).map(|p| Hold {
            lane_index: hold.lane_index + p,
            width: 1,
            ..hold.clone()
        }));
        hold.width = 1;
    }
    holds.extend(pieces);
}

fn split_slides(slides: &mut Vec<Slide>) {
    let mut pieces = Vec::new();
    for slide in slides
        .iter_mut()
        .filter(|s| s.steps.iter().all(|step| step.width_change == 0))
    {
        let mut steps = slide.steps.clone();
        steps.sort_by_key(|step| step.tick_offset);

        pieces.extend((1..slide.start_width).map(|p| Slide {
            start_lane_index: slide.start_lane_index + p,
            start_width: 1,
            steps: steps.clone(),
            ..slide.clone()
        }));
        slide.start_width = 1;
    }
    slides.extend(pieces);
}
