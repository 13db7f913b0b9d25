//! Inbound surface of the monitor. Each command maps one user-facing action
//! onto the services held in [`AppState`].

use std::time::Duration;

use crate::analysis::{history, Classification};
use crate::models::{HistoricalDay, MentalHealthStatus, Reading};
use crate::settings::UserSettings;
use crate::AppState;

/// Returns `true` if sampling started, `false` if it was already running.
pub async fn start_monitoring(state: &AppState, interval_ms: u64) -> Result<bool, String> {
    state
        .sampler
        .lock()
        .await
        .start(Duration::from_millis(interval_ms))
        .await
        .map_err(|e| e.to_string())
}

pub async fn stop_monitoring(state: &AppState) -> Result<(), String> {
    state
        .sampler
        .lock()
        .await
        .stop()
        .await
        .map_err(|e| e.to_string())
}

pub fn get_latest_reading(state: &AppState) -> Result<Option<Reading>, String> {
    Ok(state.store.latest())
}

pub fn get_readings(state: &AppState, span_hours: u32) -> Result<Vec<Reading>, String> {
    Ok(state.store.readings(span_hours))
}

pub fn get_average_heart_rate(state: &AppState, span_hours: u32) -> Result<u32, String> {
    Ok(state.store.average(span_hours))
}

pub fn get_heart_rate_variability(state: &AppState, span_hours: u32) -> Result<f64, String> {
    Ok(state.store.variability(span_hours))
}

pub fn get_mental_health(state: &AppState) -> Result<Classification, String> {
    Ok(state.classifier.classify())
}

pub fn get_historical_data(state: &AppState, days: u32) -> Result<Vec<HistoricalDay>, String> {
    Ok(state.classifier.historical_data(days))
}

/// Day counts per status over the last `days`, for the summary chart.
pub fn get_status_counts(
    state: &AppState,
    days: u32,
) -> Result<Vec<(MentalHealthStatus, usize)>, String> {
    Ok(history::status_counts(&state.classifier.historical_data(days)))
}

pub fn get_settings(state: &AppState) -> Result<UserSettings, String> {
    Ok(state.settings.get())
}

pub fn save_settings(state: &AppState, settings: UserSettings) -> Result<(), String> {
    state.settings.save(settings).map_err(|e| e.to_string())
}
