use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::state::SamplerState;
use super::store::ReadingStoreHandle;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Takes one sample per `period` until cancelled. The first tick fires one
/// full period after the loop starts; the controller takes the immediate
/// sample itself.
pub async fn sampling_loop(
    store: ReadingStoreHandle,
    state: Arc<Mutex<SamplerState>>,
    period: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let reading = store.sample();
                state.lock().await.record_sample();
                log_debug!(
                    "sampled {} bpm at {} ({} readings in window)",
                    reading.bpm,
                    reading.timestamp,
                    store.len()
                );
            }
            _ = cancel_token.cancelled() => {
                log_info!("sampling loop shutting down");
                break;
            }
        }
    }
}
