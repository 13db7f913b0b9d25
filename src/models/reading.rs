//! Heart-rate reading data model.
//!
//! A single timestamped sample produced by the reading store's sampler.

use serde::{Deserialize, Serialize};

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// One heart-rate sample. Immutable once created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub bpm: u32,
}

impl Reading {
    pub fn new(timestamp: i64, bpm: u32) -> Self {
        Self { timestamp, bpm }
    }
}
