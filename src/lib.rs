pub mod analysis;
pub mod clock;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod readings;
pub mod settings;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::sync::Mutex;

use analysis::Classifier;
use clock::{Clock, SystemClock};
use config::MonitorConfig;
use dashboard::DashboardController;
use readings::{ReadingStore, ReadingStoreHandle, SamplerController};
use settings::SettingsStore;

/// Every long-lived service, constructed once and handed to the commands.
pub struct AppState {
    pub config: MonitorConfig,
    pub store: ReadingStoreHandle,
    pub sampler: Mutex<SamplerController>,
    pub classifier: Classifier,
    pub dashboard: DashboardController,
    pub settings: SettingsStore,
}

impl AppState {
    pub fn new(config: MonitorConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let mut store = ReadingStore::new(clock);
        if config.backfill {
            store.backfill();
        }
        let store = ReadingStoreHandle::new(store);

        let settings = match &config.settings_path {
            Some(path) => SettingsStore::load(path)?,
            None => SettingsStore::new(),
        };

        let classifier = Classifier::new(config.policy, store.clone());
        let dashboard =
            DashboardController::new(classifier.clone(), store.clone(), config.refresh_interval);

        Ok(Self {
            sampler: Mutex::new(SamplerController::new(store.clone())),
            store,
            classifier,
            dashboard,
            settings,
            config,
        })
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.dashboard.stop().await;
        self.sampler.lock().await.stop().await
    }
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Mentillo starting up...");

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(serve(MonitorConfig::from_env()))
}

async fn serve(config: MonitorConfig) -> Result<()> {
    let state = AppState::new(config, Arc::new(SystemClock))?;
    info!(
        "using {:?} policy, sampling every {}ms",
        state.classifier.policy(),
        state.config.sample_interval.as_millis()
    );

    let history = state.classifier.historical_data(state.config.history_days);
    info!("history: {}", serde_json::to_string(&history)?);
    info!(
        "history by status: {}",
        serde_json::to_string(&analysis::history::status_counts(&history))?
    );

    state
        .sampler
        .lock()
        .await
        .start(state.config.sample_interval)
        .await?;
    state.dashboard.start().await;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("shutting down");

    if let Err(err) = state.shutdown().await {
        warn!("shutdown did not complete cleanly: {err:?}");
    }
    Ok(())
}
