pub mod mental_health;
pub mod reading;

pub use mental_health::{
    DayLabels, DepressionLevel, HistoricalDay, MentalHealthAssessment, MentalHealthStatus,
    RiskFactors, StressLevel, ThresholdAssessment,
};
pub use reading::{Reading, DAY_MS, HOUR_MS};
