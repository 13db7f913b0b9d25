use std::{sync::Arc, time::Duration};

use log::info;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time,
};

use crate::analysis::Classifier;
use crate::readings::ReadingStoreHandle;

use super::DashboardSnapshot;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// The slower consumer loop: re-classifies on its own cadence and publishes
/// the result to subscribers.
#[derive(Clone)]
pub struct DashboardController {
    classifier: Classifier,
    store: ReadingStoreHandle,
    refresh_interval: Duration,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    publisher: Arc<watch::Sender<Option<DashboardSnapshot>>>,
}

impl DashboardController {
    pub fn new(classifier: Classifier, store: ReadingStoreHandle, refresh_interval: Duration) -> Self {
        let (publisher, _) = watch::channel(None);
        Self {
            classifier,
            store,
            refresh_interval,
            ticker: Arc::new(Mutex::new(None)),
            publisher: Arc::new(publisher),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardSnapshot>> {
        self.publisher.subscribe()
    }

    pub fn latest(&self) -> Option<DashboardSnapshot> {
        self.publisher.borrow().clone()
    }

    /// Classifies now and publishes the snapshot.
    pub fn refresh_now(&self) -> DashboardSnapshot {
        publish(&self.classifier, &self.store, &self.publisher)
    }

    /// Spawns the refresh ticker. The first refresh happens immediately.
    pub async fn start(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if ticker_guard.is_some() {
            return;
        }

        let classifier = self.classifier.clone();
        let store = self.store.clone();
        let publisher = Arc::clone(&self.publisher);
        let refresh_interval = self.refresh_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(refresh_interval);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                publish(&classifier, &store, &publisher);
            }
        });

        *ticker_guard = Some(handle);
        info!(
            "dashboard refreshing every {}ms",
            refresh_interval.as_millis()
        );
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
            info!("dashboard refresh stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.ticker.lock().await.is_some()
    }
}

fn publish(
    classifier: &Classifier,
    store: &ReadingStoreHandle,
    publisher: &watch::Sender<Option<DashboardSnapshot>>,
) -> DashboardSnapshot {
    let snapshot = DashboardSnapshot::capture(classifier, store);
    match serde_json::to_string(&snapshot) {
        Ok(line) => log_info!("{line}"),
        Err(err) => log_warn!("failed to serialize dashboard snapshot: {err}"),
    }
    publisher.send_replace(Some(snapshot.clone()));
    snapshot
}
