use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::analysis::stats;
use crate::clock::Clock;
use crate::models::{Reading, DAY_MS, HOUR_MS};

use super::synthetic::{backfill_bpm, live_bpm};

/// Lookback used when callers do not ask for a specific span.
pub const DEFAULT_SPAN_HOURS: u32 = 24;
const BACKFILL_HOURS: i64 = 24;

/// Rolling 24h window of readings, oldest first.
pub struct ReadingStore {
    readings: Vec<Reading>,
    last_appended: Option<Reading>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl ReadingStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(clock, StdRng::from_entropy())
    }

    pub fn with_rng(clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        Self {
            readings: Vec::new(),
            last_appended: None,
            clock,
            rng,
        }
    }

    /// Seeds one synthetic reading per hour for the past day so the
    /// classifier has data before the first live sample.
    pub fn backfill(&mut self) {
        let now = self.clock.now_ms();
        for i in 0..BACKFILL_HOURS {
            let bpm = backfill_bpm(&mut self.rng);
            self.readings
                .push(Reading::new(now - (BACKFILL_HOURS - i) * HOUR_MS, bpm));
        }
    }

    /// Synthesizes a reading for the current hour, appends it and prunes.
    pub fn sample(&mut self) -> Reading {
        let now = self.clock.now_ms();
        let hour = self.clock.hour_of_day(now);
        let bpm = live_bpm(hour, &mut self.rng);
        let reading = Reading::new(now, bpm);
        self.append(reading);
        reading
    }

    /// Appends an externally produced reading with the same pruning as
    /// `sample`. Readings older than the newest one held, or already outside
    /// the 24h window, are refused and `false` is returned.
    pub fn record(&mut self, reading: Reading) -> bool {
        let cutoff = self.clock.now_ms() - DAY_MS;
        let newest = self.readings.last().map(|r| r.timestamp);
        if reading.timestamp < cutoff || newest.is_some_and(|ts| reading.timestamp < ts) {
            return false;
        }
        self.append(reading);
        true
    }

    fn append(&mut self, reading: Reading) {
        self.readings.push(reading);
        self.last_appended = Some(reading);

        let cutoff = self.clock.now_ms() - DAY_MS;
        self.readings.retain(|r| r.timestamp >= cutoff);
    }

    /// Most recently appended reading. Backfilled history does not count.
    pub fn latest(&self) -> Option<Reading> {
        self.last_appended
    }

    /// Readings no older than `span_hours`, chronological.
    pub fn readings(&self, span_hours: u32) -> Vec<Reading> {
        self.window(span_hours).copied().collect()
    }

    pub fn average(&self, span_hours: u32) -> u32 {
        stats::rounded_mean(&self.bpm_values(span_hours))
    }

    pub fn variability(&self, span_hours: u32) -> f64 {
        stats::std_dev(&self.bpm_values(span_hours))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    fn window(&self, span_hours: u32) -> impl Iterator<Item = &Reading> + '_ {
        let cutoff = self.clock.now_ms() - i64::from(span_hours) * HOUR_MS;
        self.readings.iter().filter(move |r| r.timestamp >= cutoff)
    }

    fn bpm_values(&self, span_hours: u32) -> Vec<u32> {
        self.window(span_hours).map(|r| r.bpm).collect()
    }
}

/// Shared handle to a store. The sampler is the only writer; everything
/// else reads.
#[derive(Clone)]
pub struct ReadingStoreHandle {
    inner: Arc<RwLock<ReadingStore>>,
}

impl ReadingStoreHandle {
    pub fn new(store: ReadingStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ReadingStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ReadingStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn sample(&self) -> Reading {
        self.write().sample()
    }

    pub fn record(&self, reading: Reading) -> bool {
        self.write().record(reading)
    }

    pub fn latest(&self) -> Option<Reading> {
        self.read().latest()
    }

    pub fn readings(&self, span_hours: u32) -> Vec<Reading> {
        self.read().readings(span_hours)
    }

    pub fn average(&self, span_hours: u32) -> u32 {
        self.read().average(span_hours)
    }

    pub fn variability(&self, span_hours: u32) -> f64 {
        self.read().variability(span_hours)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.read().clock()
    }

    /// Runs `f` against one consistent view of the store.
    pub fn inspect<T>(&self, f: impl FnOnce(&ReadingStore) -> T) -> T {
        f(&self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    fn store_at(hour: u32) -> (ReadingStore, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap());
        let store = ReadingStore::with_rng(Arc::new(clock.clone()), StdRng::seed_from_u64(42));
        (store, clock)
    }

    #[test]
    fn empty_store_answers_with_defaults() {
        let (store, _) = store_at(12);

        assert!(store.latest().is_none());
        assert!(store.readings(DEFAULT_SPAN_HOURS).is_empty());
        assert_eq!(store.average(DEFAULT_SPAN_HOURS), 0);
        assert_eq!(store.variability(DEFAULT_SPAN_HOURS), 0.0);
    }

    #[test]
    fn average_and_variability_follow_the_window() {
        let (mut store, clock) = store_at(12);
        let now = clock.now_ms();
        for (i, bpm) in [60, 70, 80, 90].into_iter().enumerate() {
            store.record(Reading::new(now - (4 - i as i64) * HOUR_MS, bpm));
        }

        assert_eq!(store.average(24), 75);
        assert!((store.variability(24) - 125f64.sqrt()).abs() < 1e-9);

        // last two hours only: 80 and 90
        assert_eq!(store.readings(2).len(), 2);
        assert_eq!(store.average(2), 85);
        assert!((store.variability(2) - 5.0).abs() < 1e-9);

        // a single reading has no spread
        assert_eq!(store.readings(1).len(), 1);
        assert_eq!(store.variability(1), 0.0);
    }

    #[test]
    fn sample_prunes_readings_older_than_a_day() {
        let (mut store, clock) = store_at(12);
        let now = clock.now_ms();
        assert!(store.record(Reading::new(now - DAY_MS, 71)));
        assert_eq!(store.len(), 1);

        clock.advance(chrono::Duration::minutes(5));
        let reading = store.sample();

        let cutoff = clock.now_ms() - DAY_MS;
        assert!(store.readings(48).iter().all(|r| r.timestamp >= cutoff));
        assert_eq!(store.len(), 1);
        assert_eq!(store.latest(), Some(reading));
    }

    #[test]
    fn record_refuses_stale_and_out_of_order_readings() {
        let (mut store, clock) = store_at(12);
        let now = clock.now_ms();

        assert!(store.record(Reading::new(now, 80)));
        assert!(!store.record(Reading::new(now - HOUR_MS, 90)));
        assert!(!store.record(Reading::new(now - 2 * DAY_MS, 99)));

        assert_eq!(store.readings(DEFAULT_SPAN_HOURS), vec![Reading::new(now, 80)]);
        assert_eq!(store.latest(), Some(Reading::new(now, 80)));
    }

    #[test]
    fn latest_always_lies_inside_the_window() {
        let (mut store, clock) = store_at(12);

        assert!(!store.record(Reading::new(clock.now_ms() - DAY_MS - 1, 70)));
        assert!(store.latest().is_none());

        // same timestamp as the newest reading is still in order
        assert!(store.record(Reading::new(clock.now_ms(), 70)));
        assert!(store.record(Reading::new(clock.now_ms(), 72)));
        let readings = store.readings(DEFAULT_SPAN_HOURS);
        assert!(readings.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(store.latest(), readings.last().copied());
    }

    #[test]
    fn sample_uses_hour_of_day_base() {
        let (mut store, _) = store_at(14);
        for _ in 0..50 {
            let r = store.sample();
            assert!((74..=85).contains(&r.bpm));
        }
    }

    #[test]
    fn backfill_covers_the_past_day_without_a_latest_sample() {
        let (mut store, clock) = store_at(8);
        store.backfill();

        let readings = store.readings(DEFAULT_SPAN_HOURS);
        assert_eq!(readings.len(), 24);
        assert_eq!(readings[0].timestamp, clock.now_ms() - DAY_MS);
        assert!(readings.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(store.latest().is_none());
    }

    #[test]
    fn handle_shares_state_between_clones() {
        let (store, _) = store_at(10);
        let handle = ReadingStoreHandle::new(store);
        let reader = handle.clone();

        let written = handle.sample();

        assert_eq!(reader.latest(), Some(written));
        assert_eq!(reader.len(), 1);
        assert_eq!(reader.inspect(|s| s.average(24)), written.bpm);
    }
}
