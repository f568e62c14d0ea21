use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{
    health::{refresh::refresh_loop, HealthStore},
    models::DataFrequency,
    sensing::{loop_worker::history_loop, Baseline, SensingController, SensorStore},
    todo::TodoStore,
};

use super::MonitorEvent;

const EVENT_CAPACITY: usize = 64;

/// The single scheduler behind the sensing, history and health refresh tasks.
///
/// All three run under one root token so `shutdown` tears everything down in
/// one step. The sensing task is keyed by [`DataFrequency`] and only restarts
/// when that changes.
#[derive(Clone)]
pub struct MonitorController {
    sensors: SensorStore,
    health: HealthStore,
    todos: TodoStore,
    baseline: Baseline,
    history_period: Duration,
    events: broadcast::Sender<MonitorEvent>,
    root_token: CancellationToken,
    sensing: Arc<Mutex<SensingController>>,
    background: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl MonitorController {
    pub fn new(
        sensors: SensorStore,
        health: HealthStore,
        todos: TodoStore,
        baseline: Baseline,
        history_period: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            sensors,
            health,
            todos,
            baseline,
            history_period,
            events,
            root_token: CancellationToken::new(),
            sensing: Arc::new(Mutex::new(SensingController::new())),
            background: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events.subscribe()
    }

    pub async fn is_running(&self) -> bool {
        self.sensing.lock().await.is_running()
    }

    pub async fn frequency(&self) -> Option<DataFrequency> {
        self.sensing.lock().await.frequency()
    }

    /// Starts sensing at `frequency`, plus the history and health tasks on
    /// first use. Returns `false` if sensing was already running or the
    /// monitor has been shut down.
    pub async fn start(&self, frequency: DataFrequency) -> bool {
        if self.root_token.is_cancelled() {
            warn!("Monitor start ignored after shutdown");
            return false;
        }

        let mut sensing = self.sensing.lock().await;
        let started = sensing.start_sensing(
            self.sensors.clone(),
            self.baseline,
            frequency,
            self.events.clone(),
            &self.root_token,
        );
        drop(sensing);

        if started {
            self.ensure_background().await;
        }
        started
    }

    /// Restarts sensing when `frequency` differs from the running one. A
    /// stopped monitor is started.
    pub async fn set_frequency(&self, frequency: DataFrequency) -> Result<bool> {
        {
            let mut sensing = self.sensing.lock().await;
            if sensing.frequency() == Some(frequency) {
                return Ok(false);
            }
            sensing.stop_sensing().await?;
        }

        info!("Switching sensing frequency to {:?}", frequency);
        Ok(self.start(frequency).await)
    }

    /// Stops the sensing task only. Safe to call repeatedly.
    pub async fn stop(&self) -> Result<()> {
        self.sensing.lock().await.stop_sensing().await
    }

    /// Cancels every task and waits for them to finish.
    pub async fn shutdown(&self) -> Result<()> {
        self.root_token.cancel();
        self.stop().await?;

        let handles = std::mem::take(&mut *self.background.lock().await);
        for handle in handles {
            handle
                .await
                .context("monitor background task failed to join")?;
        }

        info!("Monitor shut down");
        Ok(())
    }

    async fn ensure_background(&self) {
        let mut background = self.background.lock().await;
        if !background.is_empty() {
            return;
        }

        background.push(tokio::spawn(history_loop(
            self.sensors.clone(),
            self.history_period,
            self.events.clone(),
            self.root_token.child_token(),
        )));
        background.push(tokio::spawn(refresh_loop(
            self.sensors.clone(),
            self.health.clone(),
            self.todos.clone(),
            self.events.clone(),
            self.root_token.child_token(),
        )));
    }
}
