use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SamplerStatus {
    Idle,
    Running,
    Stopped,
}

impl Default for SamplerStatus {
    fn default() -> Self {
        SamplerStatus::Idle
    }
}

/// What the sampler is doing right now, for display and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerState {
    pub status: SamplerStatus,
    pub interval_ms: u64,
    pub started_at: Option<DateTime<Utc>>,
    /// Samples taken since the last `start`, including the immediate one.
    pub samples_taken: u64,
}

impl SamplerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status == SamplerStatus::Running
    }

    pub fn begin(&mut self, interval_ms: u64, started_at: DateTime<Utc>) {
        *self = Self {
            status: SamplerStatus::Running,
            interval_ms,
            started_at: Some(started_at),
            samples_taken: 0,
        };
    }

    pub fn record_sample(&mut self) {
        self.samples_taken = self.samples_taken.saturating_add(1);
    }

    /// Keeps the counters of the finished run for inspection.
    pub fn stop(&mut self) {
        if self.status == SamplerStatus::Running {
            self.status = SamplerStatus::Stopped;
        }
    }
}
