use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MentalHealthStatus {
    Healthy,
    Stress,
    Depression,
    Insomnia,
    Unknown,
}

impl MentalHealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentalHealthStatus::Healthy => "healthy",
            MentalHealthStatus::Stress => "stress",
            MentalHealthStatus::Depression => "depression",
            MentalHealthStatus::Insomnia => "insomnia",
            MentalHealthStatus::Unknown => "unknown",
        }
    }
}

impl Default for MentalHealthStatus {
    fn default() -> Self {
        MentalHealthStatus::Unknown
    }
}

/// Independent 0..=100 scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub stress: u32,
    pub depression: u32,
    pub insomnia: u32,
}

impl RiskFactors {
    pub fn max(&self) -> u32 {
        self.stress.max(self.depression).max(self.insomnia)
    }
}

/// Result of the risk-score policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MentalHealthAssessment {
    pub status: MentalHealthStatus,
    pub confidence: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub risk_factors: Option<RiskFactors>,
}

impl MentalHealthAssessment {
    /// Returned when there is not enough data to score.
    pub fn unknown() -> Self {
        Self {
            status: MentalHealthStatus::Unknown,
            confidence: 0,
            risk_factors: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    NotStressed,
    Stressed,
    HighlyStressed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DepressionLevel {
    NotDepressed,
    Depressed,
}

/// Result of the threshold policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdAssessment {
    pub stress_level: StressLevel,
    pub depression_level: DepressionLevel,
    pub current_heart_rate: u32,
}

/// Labels attached to a synthetic day; which variant depends on the active policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DayLabels {
    #[serde(rename_all = "camelCase")]
    Status { mental_status: MentalHealthStatus },
    #[serde(rename_all = "camelCase")]
    Levels {
        stress_level: StressLevel,
        depression_level: DepressionLevel,
    },
}

/// Synthetic per-day record. Not derived from the live reading window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDay {
    pub date: NaiveDate,
    pub average_heart_rate: i32,
    #[serde(flatten)]
    pub labels: DayLabels,
}
