use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{Classification, Classifier};
use crate::readings::{ReadingStoreHandle, DEFAULT_SPAN_HOURS};

/// Everything the dashboard view renders on one refresh.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub current_heart_rate: Option<u32>,
    pub average_heart_rate: u32,
    pub variability: f64,
    pub reading_count: usize,
    pub classification: Classification,
}

impl DashboardSnapshot {
    /// Reads the statistics and the classification under one store view.
    pub fn capture(classifier: &Classifier, store: &ReadingStoreHandle) -> Self {
        store.inspect(|s| Self {
            generated_at: s.clock().now(),
            current_heart_rate: s.latest().map(|r| r.bpm),
            average_heart_rate: s.average(DEFAULT_SPAN_HOURS),
            variability: s.variability(DEFAULT_SPAN_HOURS),
            reading_count: s.readings(DEFAULT_SPAN_HOURS).len(),
            classification: classifier.classify_view(s),
        })
    }
}
