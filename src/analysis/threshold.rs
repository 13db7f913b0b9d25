//! Single-reading threshold classification.

use crate::models::{DepressionLevel, StressLevel, ThresholdAssessment};

pub fn stress_level(bpm: u32) -> StressLevel {
    if bpm > 110 {
        StressLevel::HighlyStressed
    } else if bpm > 90 {
        StressLevel::Stressed
    } else {
        StressLevel::NotStressed
    }
}

pub fn depression_level(bpm: u32) -> DepressionLevel {
    if bpm < 60 {
        DepressionLevel::Depressed
    } else {
        DepressionLevel::NotDepressed
    }
}

/// Classifies the latest bpm. With nothing sampled yet the rate reads 0 and
/// neither level is raised.
pub fn assess(latest_bpm: Option<u32>) -> ThresholdAssessment {
    match latest_bpm {
        Some(bpm) => ThresholdAssessment {
            stress_level: stress_level(bpm),
            depression_level: depression_level(bpm),
            current_heart_rate: bpm,
        },
        None => ThresholdAssessment {
            stress_level: StressLevel::NotStressed,
            depression_level: DepressionLevel::NotDepressed,
            current_heart_rate: 0,
        },
    }
}
