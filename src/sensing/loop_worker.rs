use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use tokio::{
    sync::{broadcast, watch},
    time::{self, Duration, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    models::Thresholds,
    monitor::MonitorEvent,
};

use super::{
    generator::{self, Baseline},
    store::SensorStore,
};

// Set to false to silence the per-tick logging of this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Generates a frame every `period`, evaluating each one against the thresholds
/// currently published on `thresholds`.
///
/// A fresh frame is published immediately (without evaluation) so the first
/// reading does not wait a full period.
pub async fn sensing_loop(
    sensors: SensorStore,
    thresholds: watch::Receiver<Thresholds>,
    baseline: Baseline,
    period: Duration,
    events: broadcast::Sender<MonitorEvent>,
    cancel_token: CancellationToken,
) {
    let mut rng = StdRng::from_entropy();
    sensors.publish(generator::generate(baseline, &mut rng));
    let _ = events.send(MonitorEvent::FootDataUpdated {
        data: sensors.foot_data(),
    });

    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    log_info!("sensing loop started ({}ms period)", period.as_millis());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = *thresholds.borrow();
                let frame = generator::generate(baseline, &mut rng);
                let raised = sensors.ingest(frame.clone(), &current);

                let _ = events.send(MonitorEvent::FootDataUpdated { data: frame });
                if !raised.is_empty() {
                    log_debug!("{} alert(s) raised", raised.len());
                    let _ = events.send(MonitorEvent::AlertsRaised { alerts: raised });
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("sensing loop shutting down");
                break;
            }
        }
    }
}

/// Records today's history entry immediately and then every `period`.
pub async fn history_loop(
    sensors: SensorStore,
    period: Duration,
    events: broadcast::Sender<MonitorEvent>,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let entry = sensors.record_daily_snapshot(Utc::now());
                log_debug!("history entry for {} recorded (score {:.1})", entry.date, entry.score);
                let _ = events.send(MonitorEvent::HistoryRecorded { entry });
            }
            _ = cancel_token.cancelled() => {
                log_info!("history loop shutting down");
                break;
            }
        }
    }
}
