//! Synthetic day-by-day history for the calendar and trend views.
//!
//! Values follow a sinusoid over the day index so repeated calls for the
//! same date agree; nothing here reads the live reading window.

use chrono::{Days, NaiveDate};

use crate::analysis::threshold::{depression_level, stress_level};
use crate::analysis::PolicyKind;
use crate::models::{DayLabels, HistoricalDay, MentalHealthStatus};

const BASE_BPM: f64 = 70.0;
const STATUS_AMPLITUDE: f64 = 10.0;
const LEVEL_AMPLITUDE: f64 = 20.0;
const INSOMNIA_EVERY_DAYS: u32 = 5;
/// Longest history generated per request; larger requests are clamped.
pub const MAX_HISTORY_DAYS: u32 = 3660;

/// Up to `days` records ending with `today`, oldest first. Days that fall
/// before the earliest representable date are left out.
pub fn historical_data(policy: PolicyKind, days: u32, today: NaiveDate) -> Vec<HistoricalDay> {
    (0..days.min(MAX_HISTORY_DAYS))
        .rev()
        .filter_map(|days_ago| {
            let date = today.checked_sub_days(Days::new(u64::from(days_ago)))?;
            Some(match policy {
                PolicyKind::RiskScore => status_day(date, days_ago),
                PolicyKind::Threshold => level_day(date, days_ago),
            })
        })
        .collect()
}

/// Per-status day counts over status-labelled history, in display order,
/// zero counts omitted.
pub fn status_counts(records: &[HistoricalDay]) -> Vec<(MentalHealthStatus, usize)> {
    [
        MentalHealthStatus::Healthy,
        MentalHealthStatus::Stress,
        MentalHealthStatus::Depression,
        MentalHealthStatus::Insomnia,
        MentalHealthStatus::Unknown,
    ]
    .into_iter()
    .map(|status| {
        let count = records
            .iter()
            .filter(|r| matches!(r.labels, DayLabels::Status { mental_status } if mental_status == status))
            .count();
        (status, count)
    })
    .filter(|(_, count)| *count > 0)
    .collect()
}

fn synthetic_average(days_ago: u32, amplitude: f64) -> i32 {
    (BASE_BPM + ((f64::from(days_ago) / 2.0).sin() * amplitude).floor()) as i32
}

fn status_day(date: NaiveDate, days_ago: u32) -> HistoricalDay {
    let average_heart_rate = synthetic_average(days_ago, STATUS_AMPLITUDE);

    let mental_status = if days_ago % INSOMNIA_EVERY_DAYS == 0 {
        MentalHealthStatus::Insomnia
    } else if average_heart_rate > 80 {
        MentalHealthStatus::Stress
    } else if average_heart_rate < 65 {
        MentalHealthStatus::Depression
    } else {
        MentalHealthStatus::Healthy
    };

    HistoricalDay {
        date,
        average_heart_rate,
        labels: DayLabels::Status { mental_status },
    }
}

fn level_day(date: NaiveDate, days_ago: u32) -> HistoricalDay {
    let average_heart_rate = synthetic_average(days_ago, LEVEL_AMPLITUDE);
    let bpm = u32::try_from(average_heart_rate).unwrap_or(0);

    HistoricalDay {
        date,
        average_heart_rate,
        labels: DayLabels::Levels {
            stress_level: stress_level(bpm),
            depression_level: depression_level(bpm),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DepressionLevel, StressLevel};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn status_of(record: &HistoricalDay) -> MentalHealthStatus {
        match record.labels {
            DayLabels::Status { mental_status } => mental_status,
            DayLabels::Levels { .. } => panic!("expected status labels"),
        }
    }

    #[test]
    fn week_of_status_history() {
        let today = day(2024, 5, 10);
        let records = historical_data(PolicyKind::RiskScore, 7, today);

        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates.first(), Some(&day(2024, 5, 4)));
        assert_eq!(dates.last(), Some(&today));

        let averages: Vec<i32> = records.iter().map(|r| r.average_heart_rate).collect();
        assert_eq!(averages, vec![71, 75, 79, 79, 78, 74, 70]);

        let statuses: Vec<MentalHealthStatus> = records.iter().map(status_of).collect();
        assert_eq!(statuses[0], MentalHealthStatus::Healthy);
        assert_eq!(statuses[1], MentalHealthStatus::Insomnia);
        assert_eq!(statuses[6], MentalHealthStatus::Insomnia);
    }

    #[test]
    fn every_fifth_day_is_insomnia_even_when_rate_is_low() {
        let records = historical_data(PolicyKind::RiskScore, 11, day(2024, 5, 10));

        // ten days ago: 70 + floor(sin(5) * 10) = 60
        assert_eq!(records[0].average_heart_rate, 60);
        assert_eq!(status_of(&records[0]), MentalHealthStatus::Insomnia);
        // eight days ago: 70 + floor(sin(4) * 10) = 62
        assert_eq!(records[2].average_heart_rate, 62);
        assert_eq!(status_of(&records[2]), MentalHealthStatus::Depression);
    }

    #[test]
    fn level_history_uses_wider_swing() {
        let records = historical_data(PolicyKind::Threshold, 10, day(2024, 1, 31));

        // nine days ago: 70 + floor(sin(4.5) * 20) = 50
        assert_eq!(records[0].average_heart_rate, 50);
        assert_eq!(
            records[0].labels,
            DayLabels::Levels {
                stress_level: StressLevel::NotStressed,
                depression_level: DepressionLevel::Depressed,
            }
        );
        assert_eq!(records[9].average_heart_rate, 70);
    }

    #[test]
    fn repeated_calls_agree() {
        let today = day(2023, 12, 1);
        assert_eq!(
            historical_data(PolicyKind::RiskScore, 30, today),
            historical_data(PolicyKind::RiskScore, 30, today)
        );
        assert!(historical_data(PolicyKind::Threshold, 0, today).is_empty());
    }

    #[test]
    fn oversized_requests_are_clamped() {
        let today = day(2024, 5, 10);
        let records = historical_data(PolicyKind::RiskScore, 100_000_000, today);

        assert_eq!(records.len(), MAX_HISTORY_DAYS as usize);
        assert_eq!(records.last().map(|r| r.date), Some(today));
    }

    #[test]
    fn history_stops_at_the_earliest_date() {
        let earliest = NaiveDate::MIN;
        let today = earliest.checked_add_days(Days::new(2)).unwrap();

        let records = historical_data(PolicyKind::Threshold, 10, today);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, earliest);
        assert_eq!(records[2].date, today);
    }

    #[test]
    fn status_counts_summarise_a_week() {
        let records = historical_data(PolicyKind::RiskScore, 7, day(2024, 5, 10));

        // days ago 5 and 0 are insomnia, the rest sit between 65 and 80
        assert_eq!(
            status_counts(&records),
            vec![
                (MentalHealthStatus::Healthy, 5),
                (MentalHealthStatus::Insomnia, 2),
            ]
        );
        assert!(status_counts(&historical_data(PolicyKind::Threshold, 7, day(2024, 5, 10))).is_empty());
    }
}
