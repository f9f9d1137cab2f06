//! # Chart Data Model
//!
//! Value types describing a rhythm game chart as far as the checks in this
//! crate need it.
//!
//! ## Type Hierarchy
//! ```text
//! Chart
//!   ├── ticks_per_beat: u32
//!   ├── time_signatures: Vec<TimeSignatureChangeEvent>
//!   └── notes: Notes
//!         ├── taps / ex_taps / flicks: Vec<TapNote>   (air-capable)
//!         ├── damages: Vec<DamageNote>
//!         ├── holds: Vec<Hold>                        (air on end note)
//!         └── slides: Vec<Slide>                      (air on last step)
//! ```
//!
//! ## Short Notes
//! Tap, ex-tap, flick and damage notes are instantaneous: they sit on a single
//! tick and cover lanes `[lane_index, lane_index + width - 1]`. These four are
//! the only kinds checked for lane collisions, projected into [`ShortNote`].
//! Holds and slides have duration and are never checked.
//!
//! ## Air Attachments
//! An air or air action is owned by the note it decorates. There are no
//! back-references from the attachment to its parent.

use serde::{Deserialize, Serialize};

/// Time signature (e.g., 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Length of one bar in ticks, given the length of a 4-beat reference bar.
    ///
    /// Uses truncating integer division. Returns 0 when the denominator is 0,
    /// the bar truncates to nothing, or it does not fit in a `u32`; callers
    /// treat 0 as invalid.
    pub fn bar_length(&self, bar_ticks: u32) -> u32 {
        if self.denominator == 0 {
            return 0;
        }
        let length = u64::from(bar_ticks) * u64::from(self.numerator) / u64::from(self.denominator);
        u32::try_from(length).unwrap_or(0)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A time signature change placed at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeSignatureChangeEvent {
    pub tick: u32,
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignatureChangeEvent {
    pub fn new(tick: u32, numerator: u32, denominator: u32) -> Self {
        Self {
            tick,
            numerator,
            denominator,
        }
    }

    pub fn signature(&self) -> TimeSignature {
        TimeSignature::new(self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalDirection {
    #[default]
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalDirection {
    #[default]
    Center,
    Left,
    Right,
}

/// Air arrow attached to the end of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Air {
    pub vertical: VerticalDirection,
    pub horizontal: HorizontalDirection,
}

/// Air action: a held air gesture with action points at tick offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AirAction {
    pub offsets: Vec<u32>,
}

/// Tap, ex-tap or flick note. These three can carry air attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TapNote {
    pub tick: u32,
    pub lane_index: u32,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air: Option<Air>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_action: Option<AirAction>,
}

impl TapNote {
    pub fn new(tick: u32, lane_index: u32, width: u32) -> Self {
        Self {
            tick,
            lane_index,
            width,
            air: None,
            air_action: None,
        }
    }
}

/// Damage note. Never carries attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DamageNote {
    pub tick: u32,
    pub lane_index: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Hold {
    pub start_tick: u32,
    pub duration: u32,
    pub lane_index: u32,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air: Option<Air>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_action: Option<AirAction>,
}

/// Intermediate or final point of a slide, relative to the slide start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SlideStep {
    pub tick_offset: u32,
    #[serde(default)]
    pub lane_index_offset: i32,
    #[serde(default)]
    pub width_change: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Slide {
    pub start_tick: u32,
    pub start_lane_index: u32,
    pub start_width: u32,
    #[serde(default)]
    pub steps: Vec<SlideStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air: Option<Air>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_action: Option<AirAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Notes {
    pub taps: Vec<TapNote>,
    pub ex_taps: Vec<TapNote>,
    pub flicks: Vec<TapNote>,
    pub damages: Vec<DamageNote>,
    pub holds: Vec<Hold>,
    pub slides: Vec<Slide>,
}

/// The four note kinds checked for lane collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortNoteKind {
    Tap,
    ExTap,
    Flick,
    Damage,
}

/// Positional projection of an instantaneous note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortNote {
    pub kind: ShortNoteKind,
    pub tick: u32,
    pub lane_index: u32,
    pub width: u32,
}

impl ShortNote {
    pub fn new(kind: ShortNoteKind, tick: u32, lane_index: u32, width: u32) -> Self {
        Self {
            kind,
            tick,
            lane_index,
            width,
        }
    }

    /// Last lane covered by this note, inclusive.
    pub fn last_lane(&self) -> u32 {
        (self.lane_index + self.width).saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Chart {
    pub ticks_per_beat: u32,
    #[serde(default)]
    pub time_signatures: Vec<TimeSignatureChangeEvent>,
    #[serde(default)]
    pub notes: Notes,
}

impl Chart {
    pub fn new(ticks_per_beat: u32) -> Self {
        Self {
            ticks_per_beat,
            time_signatures: Vec::new(),
            notes: Notes::default(),
        }
    }

    /// All tap, ex-tap, flick and damage notes, in that order.
    pub fn short_notes(&self) -> Vec<ShortNote> {
        let tapped = [
            (ShortNoteKind::Tap, &self.notes.taps),
            (ShortNoteKind::ExTap, &self.notes.ex_taps),
            (ShortNoteKind::Flick, &self.notes.flicks),
        ];

        tapped
            .iter()
            .flat_map(|(kind, notes)| {
                notes
                    .iter()
                    .map(move |n| ShortNote::new(*kind, n.tick, n.lane_index, n.width))
            })
            .chain(
                self.notes
                    .damages
                    .iter()
                    .map(|n| ShortNote::new(ShortNoteKind::Damage, n.tick, n.lane_index, n.width)),
            )
            .collect()
    }

    /// The declared time signature events, or a single 4/4 at tick 0 when the
    /// chart declares none.
    pub fn effective_time_signatures(&self) -> Vec<TimeSignatureChangeEvent> {
        if self.time_signatures.is_empty() {
            log::warn!("Chart declares no time signature, assuming 4/4");
            let default = TimeSignature::default();
            vec![TimeSignatureChangeEvent::new(
                0,
                default.numerator,
                default.denominator,
            )]
        } else {
            self.time_signatures.clone()
        }
    }
}
