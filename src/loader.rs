//! # Chart Files
//!
//! Charts are stored as YAML with kebab-case keys:
//!
//! ```yaml
//! ticks-per-beat: 480
//! time-signatures:
//!   - { tick: 0, numerator: 4, denominator: 4 }
//! notes:
//!   taps:
//!     - { tick: 0, lane-index: 2, width: 4 }
//!   holds:
//!     - { start-tick: 0, duration: 480, lane-index: 0, width: 2, air: { vertical: down } }
//! ```
//!
//! Every note list is optional. Reading and writing files is left to the caller.

use crate::chart::Chart;
use crate::error::ChartError;

/// Parse a chart from YAML source.
///
/// # Errors
/// [`ChartError::FormatError`] for malformed YAML or unknown enum values.
/// Resolution and time signatures are checked when a timeline is built.
pub fn parse_chart(source: &str) -> Result<Chart, ChartError> {
    let chart: Chart =
        serde_yaml::from_str(source).map_err(|e| ChartError::FormatError(e.to_string()))?;

    log::debug!(
        "Parsed chart: {} ticks per beat, {} time signature events",
        chart.ticks_per_beat,
        chart.time_signatures.len()
    );
    Ok(chart)
}

/// Serialize a chart back to YAML.
pub fn chart_to_yaml(chart: &Chart) -> Result<String, ChartError> {
    serde_yaml::to_string(chart).map_err(|e| ChartError::FormatError(e.to_string()))
}
