use serde::Serialize;

use crate::models::{Alert, DailyScore, FootData, HealthIndex};

/// Broadcast to every subscriber of the monitor.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorEvent {
    FootDataUpdated { data: FootData },
    AlertsRaised { alerts: Vec<Alert> },
    HistoryRecorded { entry: DailyScore },
    HealthIndexUpdated { index: HealthIndex },
}
