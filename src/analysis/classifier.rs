use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{HistoricalDay, MentalHealthAssessment, ThresholdAssessment};
use crate::readings::{ReadingStore, ReadingStoreHandle};

use super::{config::AnalysisConfig, history, risk, threshold};

/// Which classification strategy a deployment runs. Chosen once at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    RiskScore,
    Threshold,
}

impl Default for PolicyKind {
    fn default() -> Self {
        PolicyKind::RiskScore
    }
}

impl FromStr for PolicyKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "risk" | "risk_score" | "risk-score" => Ok(PolicyKind::RiskScore),
            "threshold" => Ok(PolicyKind::Threshold),
            other => Err(anyhow::anyhow!("unknown classification policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Classification {
    RiskScore(MentalHealthAssessment),
    Threshold(ThresholdAssessment),
}

/// Reads the store and classifies; never writes to it.
#[derive(Clone)]
pub struct Classifier {
    policy: PolicyKind,
    store: ReadingStoreHandle,
    config: AnalysisConfig,
}

impl Classifier {
    pub fn new(policy: PolicyKind, store: ReadingStoreHandle) -> Self {
        Self::with_config(policy, store, AnalysisConfig::default())
    }

    pub fn with_config(policy: PolicyKind, store: ReadingStoreHandle, config: AnalysisConfig) -> Self {
        Self {
            policy,
            store,
            config,
        }
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn classify(&self) -> Classification {
        self.store.inspect(|store| self.classify_view(store))
    }

    /// Classifies against a store view the caller already holds, so the
    /// result agrees with whatever else was read from that view.
    pub fn classify_view(&self, store: &ReadingStore) -> Classification {
        match self.policy {
            PolicyKind::RiskScore => Classification::RiskScore(self.risk_assessment(store)),
            PolicyKind::Threshold => {
                Classification::Threshold(threshold::assess(store.latest().map(|r| r.bpm)))
            }
        }
    }

    fn risk_assessment(&self, store: &ReadingStore) -> MentalHealthAssessment {
        let clock = store.clock();
        let readings = store.readings(self.config.span_hours);
        risk::assess(&readings, |ts| clock.hour_of_day(ts), &self.config)
    }

    /// Synthetic history ending today, labelled for this classifier's policy.
    pub fn historical_data(&self, days: u32) -> Vec<HistoricalDay> {
        history::historical_data(self.policy, days, self.store.clock().today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::models::{DepressionLevel, MentalHealthStatus, Reading, StressLevel, HOUR_MS};
    use chrono::{TimeZone, Utc};
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::Arc;

    fn store() -> (ReadingStoreHandle, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 7, 15, 20, 0, 0).unwrap());
        let store = ReadingStore::with_rng(Arc::new(clock.clone()), StdRng::seed_from_u64(9));
        (ReadingStoreHandle::new(store), clock)
    }

    fn fill(handle: &ReadingStoreHandle, clock: &ManualClock, values: &[u32]) {
        let now = clock.now_ms();
        let n = values.len() as i64;
        for (i, &bpm) in values.iter().enumerate() {
            handle.record(Reading::new(now - (n - i as i64) * HOUR_MS, bpm));
        }
    }

    #[test]
    fn risk_policy_needs_five_readings() {
        let (handle, clock) = store();
        let classifier = Classifier::new(PolicyKind::RiskScore, handle.clone());

        fill(&handle, &clock, &[72, 74, 71, 73]);
        assert_eq!(
            classifier.classify(),
            Classification::RiskScore(MentalHealthAssessment::unknown())
        );

        handle.record(Reading::new(clock.now_ms(), 75));
        let Classification::RiskScore(result) = classifier.classify() else {
            panic!("expected risk score classification");
        };
        assert!(result.risk_factors.is_some());
        assert_ne!(result.status, MentalHealthStatus::Unknown);
    }

    #[test]
    fn risk_policy_flags_night_disturbance() {
        let (handle, clock) = store();
        // readings land on 22:00..=05:00, all night hours
        clock.set(Utc.with_ymd_and_hms(2024, 7, 16, 6, 0, 0).unwrap());
        fill(&handle, &clock, &[95, 60, 95, 60, 95, 60, 95, 60]);

        let classifier = Classifier::new(PolicyKind::RiskScore, handle);
        let Classification::RiskScore(result) = classifier.classify() else {
            panic!("expected risk score classification");
        };

        let risks = result.risk_factors.unwrap();
        // mean 77.5 > 70, sd 17.5 > 15, seven jumps
        assert_eq!(risks.insomnia, 90);
        assert_eq!(result.status, MentalHealthStatus::Insomnia);
        assert_eq!(result.confidence, 90);
    }

    #[test]
    fn threshold_policy_reads_only_the_latest_sample() {
        let (handle, clock) = store();
        let classifier = Classifier::new(PolicyKind::Threshold, handle.clone());

        assert_eq!(
            classifier.classify(),
            Classification::Threshold(ThresholdAssessment {
                stress_level: StressLevel::NotStressed,
                depression_level: DepressionLevel::NotDepressed,
                current_heart_rate: 0,
            })
        );

        fill(&handle, &clock, &[120, 130, 95]);
        let Classification::Threshold(result) = classifier.classify() else {
            panic!("expected threshold classification");
        };
        assert_eq!(result.current_heart_rate, 95);
        assert_eq!(result.stress_level, StressLevel::Stressed);
    }

    #[test]
    fn history_is_labelled_by_policy_and_dated_from_the_clock() {
        let (handle, _) = store();
        let classifier = Classifier::new(PolicyKind::Threshold, handle);

        let records = classifier.historical_data(14);
        assert_eq!(records.len(), 14);
        assert_eq!(records[13].date.to_string(), "2024-07-15");
        assert!(records
            .iter()
            .all(|r| matches!(r.labels, crate::models::DayLabels::Levels { .. })));
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!("risk".parse::<PolicyKind>().unwrap(), PolicyKind::RiskScore);
        assert_eq!(" Threshold ".parse::<PolicyKind>().unwrap(), PolicyKind::Threshold);
        assert!("ml".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn classification_serializes_with_policy_tag() {
        let json = serde_json::to_value(Classification::RiskScore(
            MentalHealthAssessment::unknown(),
        ))
        .unwrap();
        assert_eq!(json["policy"], "risk_score");
        assert_eq!(json["status"], "unknown");
        assert!(json.get("riskFactors").is_none());
    }
}
