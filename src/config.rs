use log::warn;
use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::analysis::PolicyKind;

pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

/// Runtime wiring of the monitor, read from `MENTILLO_*` environment variables.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub sample_interval: Duration,
    pub refresh_interval: Duration,
    pub policy: PolicyKind,
    pub history_days: u32,
    /// Seed the store with a day of synthetic readings at startup.
    pub backfill: bool,
    pub settings_path: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_millis(DEFAULT_SAMPLE_INTERVAL_MS),
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            policy: PolicyKind::default(),
            history_days: DEFAULT_HISTORY_DAYS,
            backfill: true,
            settings_path: None,
        }
    }
}

impl MonitorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let sample_ms = parse_or(&lookup, "MENTILLO_SAMPLE_MS", DEFAULT_SAMPLE_INTERVAL_MS);
        let refresh_ms = parse_or(&lookup, "MENTILLO_REFRESH_MS", DEFAULT_REFRESH_INTERVAL_MS);
        let debug_mode = lookup("MENTILLO_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let sample_interval = positive_ms(sample_ms, DEFAULT_SAMPLE_INTERVAL_MS);
        let refresh_interval = if debug_mode {
            sample_interval
        } else {
            positive_ms(refresh_ms, DEFAULT_REFRESH_INTERVAL_MS)
        };

        Self {
            sample_interval,
            refresh_interval,
            policy: parse_or(&lookup, "MENTILLO_POLICY", defaults.policy),
            history_days: parse_or(&lookup, "MENTILLO_HISTORY_DAYS", defaults.history_days),
            backfill: parse_or(&lookup, "MENTILLO_BACKFILL", defaults.backfill),
            settings_path: lookup("MENTILLO_SETTINGS").map(PathBuf::from),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}, using default");
            default
        }),
        None => default,
    }
}

fn positive_ms(value: u64, fallback: u64) -> Duration {
    if value == 0 {
        warn!("interval of 0ms is not allowed, using {fallback}ms");
        Duration::from_millis(fallback)
    } else {
        Duration::from_millis(value)
    }
}
