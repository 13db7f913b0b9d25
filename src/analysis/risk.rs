//! Multi-factor risk scoring over the reading window.
//!
//! Each factor is a sum of fixed point awards capped at 100. The dominant
//! factor becomes the status once it clears the flag threshold.

use crate::analysis::config::AnalysisConfig;
use crate::analysis::stats;
use crate::models::{MentalHealthAssessment, MentalHealthStatus, Reading, RiskFactors};
use crate::readings::synthetic::is_night_hour;

const MAX_RISK: u32 = 100;

/// Scores `readings` (chronological). `hour_of_day` maps a timestamp to 0..=23.
pub fn assess(
    readings: &[Reading],
    hour_of_day: impl Fn(i64) -> u32,
    config: &AnalysisConfig,
) -> MentalHealthAssessment {
    if readings.len() < config.min_readings {
        return MentalHealthAssessment::unknown();
    }

    let all: Vec<u32> = readings.iter().map(|r| r.bpm).collect();
    let average = stats::rounded_mean(&all);
    let variability = stats::std_dev(&all);
    let recent = &all[all.len().saturating_sub(config.recent_window)..];

    let (night, day): (Vec<&Reading>, Vec<&Reading>) = readings
        .iter()
        .partition(|r| is_night_hour(hour_of_day(r.timestamp)));
    let night: Vec<u32> = night.into_iter().map(|r| r.bpm).collect();
    let day: Vec<u32> = day.into_iter().map(|r| r.bpm).collect();

    let risk_factors = RiskFactors {
        stress: stress_risk(average, variability, recent),
        depression: depression_risk(average, stats::mean(&day), stats::mean(&night)),
        insomnia: insomnia_risk(&night, config.min_night_readings),
    };

    let max_risk = risk_factors.max();
    MentalHealthAssessment {
        status: dominant_status(&risk_factors, config.flag_threshold),
        confidence: max_risk.min(MAX_RISK),
        risk_factors: Some(risk_factors),
    }
}

/// Elevated rate, low variability and a rising recent trend.
pub fn stress_risk(average: u32, variability: f64, recent: &[u32]) -> u32 {
    let mut risk = 0;

    if average > 85 {
        risk += 30;
    } else if average > 75 {
        risk += 15;
    }

    if variability < 5.0 {
        risk += 40;
    } else if variability < 10.0 {
        risk += 20;
    }

    let rising = recent.windows(2).filter(|pair| pair[1] > pair[0]).count();
    if rising >= 3 {
        risk += 15;
    }

    risk.min(MAX_RISK)
}

/// Low rate overall, flat day/night rhythm and a sluggish daytime rate.
pub fn depression_risk(average: u32, average_day: f64, average_night: f64) -> u32 {
    let mut risk = 0;

    if average < 60 {
        risk += 25;
    } else if average < 65 {
        risk += 15;
    }

    let rhythm = (average_day - average_night).abs();
    if rhythm < 5.0 {
        risk += 30;
    } else if rhythm < 8.0 {
        risk += 15;
    }

    if average_day < 65.0 {
        risk += 25;
    } else if average_day < 70.0 {
        risk += 15;
    }

    risk.min(MAX_RISK)
}

/// Elevated and erratic night-time rate. `night` is chronological.
pub fn insomnia_risk(night: &[u32], min_night_readings: usize) -> u32 {
    if night.len() < min_night_readings {
        return 0;
    }

    let mut risk = 0;

    let average_night = stats::mean(night);
    if average_night > 70.0 {
        risk += 30;
    } else if average_night > 65.0 {
        risk += 15;
    }

    let night_variability = stats::std_dev(night);
    if night_variability > 15.0 {
        risk += 40;
    } else if night_variability > 10.0 {
        risk += 20;
    }

    let irregular = night
        .windows(2)
        .filter(|pair| pair[0].abs_diff(pair[1]) > 10)
        .count();
    if irregular >= 3 {
        risk += 20;
    } else if irregular > 1 {
        risk += 10;
    }

    risk.min(MAX_RISK)
}

/// Ties resolve stress first, then depression, then insomnia.
fn dominant_status(risks: &RiskFactors, flag_threshold: u32) -> MentalHealthStatus {
    let max_risk = risks.max();
    if max_risk <= flag_threshold {
        return MentalHealthStatus::Healthy;
    }

    if risks.stress == max_risk {
        MentalHealthStatus::Stress
    } else if risks.depression == max_risk {
        MentalHealthStatus::Depression
    } else {
        MentalHealthStatus::Insomnia
    }
}
