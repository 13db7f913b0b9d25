use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, TimeZone, Timelike, Utc};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

/// Source of "now" and of the hour-of-day used by the day/night heuristics.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Hour (0..=23) of the given epoch-millis timestamp in the clock's zone.
    fn hour_of_day(&self, timestamp_ms: i64) -> u32;

    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Calendar date used to label historical records.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock; hours are taken in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn hour_of_day(&self, timestamp_ms: i64) -> u32 {
        match Local.timestamp_millis_opt(timestamp_ms).single() {
            Some(local) => local.hour(),
            None => Utc
                .timestamp_millis_opt(timestamp_ms)
                .single()
                .map(|utc| utc.hour())
                .unwrap_or(0),
        }
    }
}

/// Settable clock with a fixed UTC offset. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Arc<AtomicI64>,
    offset: FixedOffset,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_offset(start, Utc.fix())
    }

    pub fn with_offset(start: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now_ms: Arc::new(AtomicI64::new(start.timestamp_millis())),
            offset,
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now_ms.store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, delta: chrono::Duration) {
        self.now_ms
            .fetch_add(delta.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.now_ms.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    fn hour_of_day(&self, timestamp_ms: i64) -> u32 {
        self.offset
            .timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|local| local.hour())
            .unwrap_or(0)
    }
}
