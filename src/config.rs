//! Check options.

use crate::error::ChartError;

/// Number of lanes in the chart format.
pub const DEFAULT_LANES_COUNT: usize = 16;

/// Largest lane axis addressable with `u32` lane indices.
pub const MAX_LANES_COUNT: usize = u32::MAX as usize;

/// Detailed entries shown in a duplicate report before the rest are summarised.
pub const DEFAULT_MAX_REPORT_ENTRIES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub lanes_count: usize,
    pub max_report_entries: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            lanes_count: DEFAULT_LANES_COUNT,
            max_report_entries: DEFAULT_MAX_REPORT_ENTRIES,
        }
    }
}

impl CheckOptions {
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.lanes_count == 0 {
            return Err(ChartError::FormatError(
                "lanes count must be at least 1".to_string(),
            ));
        }
        if self.lanes_count > MAX_LANES_COUNT {
            return Err(ChartError::FormatError(format!(
                "lanes count must be at most {}, got {}",
                MAX_LANES_COUNT, self.lanes_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CheckOptions::default();
        assert_eq!(options.lanes_count, 16);
        assert_eq!(options.max_report_entries, 5);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_lanes_rejected() {
        let options = CheckOptions {
            lanes_count: 0,
            ..CheckOptions::default()
        };
        assert!(matches!(options.validate(), Err(ChartError::FormatError(_))));
    }

    #[test]
    fn test_lanes_beyond_u32_rejected() {
        let options = CheckOptions {
            lanes_count: usize::MAX,
            ..CheckOptions::default()
        };
        assert!(matches!(options.validate(), Err(ChartError::FormatError(_))));

        let options = CheckOptions {
            lanes_count: MAX_LANES_COUNT,
            ..CheckOptions::default()
        };
        assert!(options.validate().is_ok());
    }
}
