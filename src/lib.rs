pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod overlap;
pub mod report;
pub mod split;
pub mod timeline;

pub use chart::*;
pub use config::CheckOptions;
pub use error::*;
pub use loader::{chart_to_yaml, parse_chart};
pub use overlap::{detect_overlaps, OverlapRange};
pub use report::{check_duplicates, DuplicateLocation, DuplicateReport};
pub use split::split_chart;
pub use timeline::{BarPosition, TimeSignatureSegment, TimeSignatureTimeline};

/// Parse a YAML chart and check it for duplicated short notes.
/// This is the main entry point for the library.
pub fn check_source(source: &str, options: &CheckOptions) -> Result<DuplicateReport, ChartError> {
    let chart = parse_chart(source)?;
    check_duplicates(&chart, options)
}

/// Parse a YAML chart, split its wide notes, and return the result as YAML.
pub fn split_source(source: &str) -> Result<String, ChartError> {
    let chart = parse_chart(source)?;
    chart_to_yaml(&split_chart(&chart))
}

/// Bar position of `tick` in a YAML chart.
pub fn locate_tick(source: &str, tick: u32) -> Result<BarPosition, ChartError> {
    let chart = parse_chart(source)?;
    let timeline =
        TimeSignatureTimeline::new(chart.ticks_per_beat, &chart.effective_time_signatures())?;
    timeline.bar_position_from_tick(tick)
}
