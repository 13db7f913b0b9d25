use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::sampler::sampling_loop;
use super::state::SamplerState;
use super::store::ReadingStoreHandle;

/// Owns the periodic sampling task for one reading store.
pub struct SamplerController {
    store: ReadingStoreHandle,
    state: Arc<Mutex<SamplerState>>,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl SamplerController {
    pub fn new(store: ReadingStoreHandle) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(SamplerState::new())),
            handle: None,
            cancel_token: None,
        }
    }

    /// Starts sampling every `interval`, taking one sample immediately.
    /// Returns `Ok(false)` without side effects when already running.
    pub async fn start(&mut self, interval: Duration) -> Result<bool> {
        if interval.is_zero() {
            bail!("sampling interval must be greater than zero");
        }
        if self.handle.is_some() {
            return Ok(false);
        }

        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        {
            let mut state = self.state.lock().await;
            state.begin(interval_ms, Utc::now());
            self.store.sample();
            state.record_sample();
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(sampling_loop(
            self.store.clone(),
            Arc::clone(&self.state),
            interval,
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        info!("heart-rate sampling started every {}ms", interval_ms);
        Ok(true)
    }

    /// Cancels the sampling task and waits for it to exit. No-op when idle.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        let joined = handle
            .await
            .context("sampling loop task failed to join");
        self.state.lock().await.stop();
        info!("heart-rate sampling stopped");
        joined
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub async fn state(&self) -> SamplerState {
        self.state.lock().await.clone()
    }

    pub fn store(&self) -> &ReadingStoreHandle {
        &self.store
    }
}
