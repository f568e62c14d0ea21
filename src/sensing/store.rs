use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use log::info;
use tokio::sync::watch;

use crate::{
    db::{keys, Database},
    models::{Alert, DailyScore, FootData, Thresholds, UserProfile},
    utils::BoundedLog,
};

use super::{
    alerts::{self, MAX_ALERTS},
    generator::{self, Baseline},
    history::{self, HistorySummary, MAX_HISTORY_DAYS},
    risk,
};

struct SensorState {
    alerts: BoundedLog<Alert>,
    history: BoundedLog<DailyScore>,
    profile: UserProfile,
}

/// Session-scoped owner of the sensor feed, alert log, daily history,
/// thresholds and user profile.
///
/// The live frame and the thresholds are published over `watch` channels so
/// background tasks always read the latest value instead of a captured copy.
#[derive(Clone)]
pub struct SensorStore {
    db: Database,
    state: Arc<RwLock<SensorState>>,
    thresholds_tx: Arc<watch::Sender<Thresholds>>,
    foot_tx: Arc<watch::Sender<FootData>>,
}

impl SensorStore {
    /// Loads persisted state; anything missing or unreadable falls back to defaults.
    pub async fn load(db: Database, baseline: Baseline) -> Self {
        let (profile, thresholds, history, alerts) = tokio::join!(
            db.load_json::<UserProfile>(keys::PROFILE),
            db.load_json::<Thresholds>(keys::THRESHOLDS),
            db.load_json::<Vec<DailyScore>>(keys::HISTORY),
            db.load_json::<Vec<Alert>>(keys::ALERTS),
        );

        let history = history.unwrap_or_default();
        let alerts = alerts.unwrap_or_default();
        info!(
            "Sensor state loaded ({} alerts, {} history days)",
            alerts.len(),
            history.len()
        );

        let state = SensorState {
            alerts: BoundedLog::from_vec(MAX_ALERTS, alerts),
            history: BoundedLog::from_vec(MAX_HISTORY_DAYS, history),
            profile: profile.unwrap_or_default(),
        };
        let initial_frame = generator::generate(baseline, &mut rand::thread_rng());

        Self {
            db,
            state: Arc::new(RwLock::new(state)),
            thresholds_tx: Arc::new(watch::Sender::new(thresholds.unwrap_or_default())),
            foot_tx: Arc::new(watch::Sender::new(initial_frame)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SensorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SensorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn foot_data(&self) -> FootData {
        self.foot_tx.borrow().clone()
    }

    pub fn thresholds(&self) -> Thresholds {
        *self.thresholds_tx.borrow()
    }

    pub fn subscribe_thresholds(&self) -> watch::Receiver<Thresholds> {
        self.thresholds_tx.subscribe()
    }

    pub fn subscribe_foot_data(&self) -> watch::Receiver<FootData> {
        self.foot_tx.subscribe()
    }

    /// Alert log, most recent first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.read().alerts.to_vec()
    }

    pub fn active_alerts(&self) -> Vec<Alert> {
        self.read()
            .alerts
            .iter()
            .filter(|alert| !alert.dismissed)
            .cloned()
            .collect()
    }

    pub fn dismissed_alerts(&self) -> Vec<Alert> {
        self.read()
            .alerts
            .iter()
            .filter(|alert| alert.dismissed)
            .cloned()
            .collect()
    }

    /// Daily history, most recently recorded first.
    pub fn history(&self) -> Vec<DailyScore> {
        self.read().history.to_vec()
    }

    pub fn history_summary(&self) -> Option<HistorySummary> {
        history::summarize(self.read().history.iter())
    }

    pub fn profile(&self) -> UserProfile {
        self.read().profile.clone()
    }

    pub fn risk_score(&self) -> f64 {
        risk::score(&self.foot_tx.borrow(), &self.thresholds())
    }

    pub fn save_profile(&self, profile: UserProfile) {
        self.db.save_json_detached(keys::PROFILE, &profile);
        self.write().profile = profile;
    }

    /// Takes effect from the next evaluation tick.
    pub fn save_thresholds(&self, thresholds: Thresholds) {
        self.thresholds_tx.send_replace(thresholds);
        self.db.save_json_detached(keys::THRESHOLDS, &thresholds);
    }

    /// Onboarding's notification threshold replaces the pressure threshold.
    pub fn apply_notification_threshold(&self, pressure: f64) {
        self.thresholds_tx.send_if_modified(|current| {
            if current.pressure == pressure {
                return false;
            }
            current.pressure = pressure;
            true
        });
    }

    pub fn dismiss_alert(&self, alert_id: &str) -> bool {
        let mut state = self.write();
        let found = alerts::dismiss(&mut state.alerts, alert_id);
        if found {
            self.db.save_json_detached(keys::ALERTS, &state.alerts);
        }
        found
    }

    /// Replaces the live frame without evaluating it.
    pub fn publish(&self, data: FootData) {
        self.foot_tx.send_replace(data);
    }

    /// Publishes a new frame, evaluates it and records any alerts.
    ///
    /// The alert log is persisted only when this frame raised something.
    pub fn ingest(&self, data: FootData, thresholds: &Thresholds) -> Vec<Alert> {
        let raised = alerts::evaluate(&data, thresholds);
        self.foot_tx.send_replace(data);

        if !raised.is_empty() {
            let mut state = self.write();
            state.alerts.prepend(raised.iter().cloned());
            self.db.save_json_detached(keys::ALERTS, &state.alerts);
        }

        raised
    }

    /// Upserts today's entry from the live frame and persists the history.
    pub fn record_daily_snapshot(&self, now: DateTime<Utc>) -> DailyScore {
        let data = self.foot_data();
        let thresholds = self.thresholds();

        let mut state = self.write();
        let entry = history::daily_snapshot(now, &data, &thresholds, state.alerts.iter());
        history::upsert(&mut state.history, entry.clone());
        self.db.save_json_detached(keys::HISTORY, &state.history);
        entry
    }
}
