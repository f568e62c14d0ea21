use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::{
    models::{FootData, HealthIndex},
    monitor::MonitorEvent,
    sensing::SensorStore,
    todo::TodoStore,
};

use super::{index, store::HealthStore};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Recomputes the health index from the live frame and the current task
/// completion rate.
pub fn refresh_health(sensors: &SensorStore, health: &HealthStore, todos: &TodoStore) -> HealthIndex {
    refresh_from_frame(&sensors.foot_data(), health, todos)
}

fn refresh_from_frame(data: &FootData, health: &HealthStore, todos: &TodoStore) -> HealthIndex {
    let (pressure, temperature) = index::foot_subscores(data);
    health.update_health_index(pressure, temperature, todos.completion_rate())
}

/// Refreshes the index once on start and again whenever a new frame is
/// published.
pub async fn refresh_loop(
    sensors: SensorStore,
    health: HealthStore,
    todos: TodoStore,
    events: broadcast::Sender<MonitorEvent>,
    cancel_token: CancellationToken,
) {
    let mut frames = sensors.subscribe_foot_data();
    frames.mark_changed();
    log_info!("health refresh loop started");

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    log_info!("foot data channel closed, stopping health refresh");
                    break;
                }
                let data = frames.borrow_and_update().clone();
                let index = refresh_from_frame(&data, &health, &todos);
                log_debug!("health index {:.1} ({:?})", index.score, index.level);
                let _ = events.send(MonitorEvent::HealthIndexUpdated { index });
            }
            _ = cancel_token.cancelled() => {
                log_info!("health refresh loop shutting down");
                break;
            }
        }
    }
}
