//! Simulated heart-rate source. Stands in for a wearable sensor.

use rand::Rng;

pub const BASE_BPM: i32 = 70;
const DAYTIME_BOOST: i32 = 10;
const NIGHT_DROP: i32 = 10;
const JITTER_BPM: f64 = 6.0;

const BACKFILL_MIN_BPM: f64 = 65.0;
const BACKFILL_SPREAD_BPM: f64 = 20.0;

pub fn is_night_hour(hour: u32) -> bool {
    hour >= 22 || hour <= 5
}

/// Expected resting rate for the hour: higher while active, lower during sleep.
pub fn base_bpm(hour: u32) -> i32 {
    if (9..=18).contains(&hour) {
        BASE_BPM + DAYTIME_BOOST
    } else if is_night_hour(hour) {
        BASE_BPM - NIGHT_DROP
    } else {
        BASE_BPM
    }
}

/// `floor(base(hour) + U[-6, 6))`.
pub fn live_bpm<R: Rng + ?Sized>(hour: u32, rng: &mut R) -> u32 {
    let jitter = rng.gen_range(-JITTER_BPM..JITTER_BPM);
    (f64::from(base_bpm(hour)) + jitter).floor().max(0.0) as u32
}

/// Startup history values, uniform in 65..=84.
pub fn backfill_bpm<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    (BACKFILL_MIN_BPM + rng.gen::<f64>() * BACKFILL_SPREAD_BPM).floor() as u32
}
