//! Small descriptive statistics over bpm values.

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    sum as f64 / values.len() as f64
}

/// Mean rounded half-up to the nearest integer, 0 for an empty slice.
pub fn rounded_mean(values: &[u32]) -> u32 {
    (mean(values) + 0.5).floor() as u32
}

/// Population standard deviation, 0.0 for fewer than two values.
pub fn std_dev(values: &[u32]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
