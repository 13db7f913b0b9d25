use crate::readings::DEFAULT_SPAN_HOURS;

/// Tunables for the risk-score classifier.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Lookback for the reading set, average and variability
    pub span_hours: u32,

    /// Fewer readings than this yields an `unknown` assessment
    pub min_readings: usize,

    /// Trailing readings inspected for a rising trend
    pub recent_window: usize,

    /// A risk factor must exceed this to be reported as the status
    pub flag_threshold: u32,

    /// Insomnia is not scored with fewer night readings than this
    pub min_night_readings: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            span_hours: DEFAULT_SPAN_HOURS,
            min_readings: 5,
            recent_window: 5,
            flag_threshold: 50,
            min_night_readings: 3,
        }
    }
}
