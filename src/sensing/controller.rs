use anyhow::{Context, Result};
use log::info;
use tokio::{sync::broadcast, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{models::DataFrequency, monitor::MonitorEvent};

use super::{generator::Baseline, loop_worker::sensing_loop, store::SensorStore};

/// Owns the single sensing task. Starting while running and stopping while
/// stopped are both no-ops.
pub struct SensingController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    frequency: Option<DataFrequency>,
}

impl SensingController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
            frequency: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Cadence of the running task, `None` when stopped.
    pub fn frequency(&self) -> Option<DataFrequency> {
        self.frequency
    }

    /// Spawns the sensing task under `parent`. Returns `false` if one was
    /// already running.
    pub fn start_sensing(
        &mut self,
        sensors: SensorStore,
        baseline: Baseline,
        frequency: DataFrequency,
        events: broadcast::Sender<MonitorEvent>,
        parent: &CancellationToken,
    ) -> bool {
        if self.handle.is_some() {
            return false;
        }

        let cancel_token = parent.child_token();
        let thresholds = sensors.subscribe_thresholds();
        let handle = tokio::spawn(sensing_loop(
            sensors,
            thresholds,
            baseline,
            frequency.interval(),
            events,
            cancel_token.clone(),
        ));

        info!("Sensing started at {:?} frequency", frequency);
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.frequency = Some(frequency);
        true
    }

    /// Cancels the task (at most once) and waits for it to finish.
    pub async fn stop_sensing(&mut self) -> Result<()> {
        self.frequency = None;
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("sensing loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for SensingController {
    fn default() -> Self {
        Self::new()
    }
}
