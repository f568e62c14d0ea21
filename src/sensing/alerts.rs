use crate::{
    models::{Alert, AlertKind, Foot, FootData, FootZone, Thresholds},
    utils::BoundedLog,
};

pub const MAX_ALERTS: usize = 50;

pub fn alert_id(timestamp: i64, foot: Foot, zone: FootZone, kind: AlertKind) -> String {
    format!("{timestamp}-{foot}-{zone}-{}", kind.id_suffix())
}

pub fn alert_message(kind: AlertKind, foot: Foot, zone: FootZone, value: f64) -> String {
    match kind {
        AlertKind::Pressure => {
            format!("High pressure detected on {foot} {zone}: {value:.1} kPa")
        }
        AlertKind::Temperature => format!("High temperature on {foot} {zone}: {value:.1}°C"),
    }
}

/// Checks every zone of both feet against `thresholds`.
///
/// Strictly greater triggers, so a reading equal to its threshold never alerts.
/// Alerts come out zone by zone (heel to toes), left foot before right, and
/// pressure before temperature within one reading. All carry the frame's
/// `last_update` as their timestamp.
pub fn evaluate(data: &FootData, thresholds: &Thresholds) -> Vec<Alert> {
    let timestamp = data.last_update;
    let mut alerts = Vec::new();

    for zone in FootZone::ALL {
        for foot in Foot::BOTH {
            let reading = data.reading(foot, zone);
            let checks = [
                (AlertKind::Pressure, reading.pressure, thresholds.pressure),
                (AlertKind::Temperature, reading.temperature, thresholds.temperature),
            ];

            for (kind, value, threshold) in checks {
                if value > threshold {
                    alerts.push(Alert {
                        id: alert_id(timestamp, foot, zone, kind),
                        kind,
                        foot,
                        zone,
                        value,
                        threshold,
                        message: alert_message(kind, foot, zone, value),
                        timestamp,
                        dismissed: false,
                    });
                }
            }
        }
    }

    alerts
}

pub fn new_alert_log() -> BoundedLog<Alert> {
    BoundedLog::new(MAX_ALERTS)
}

/// Flips `dismissed` on the matching alert. Returns whether one was found.
pub fn dismiss(log: &mut BoundedLog<Alert>, alert_id: &str) -> bool {
    match log.iter_mut().find(|alert| alert.id == alert_id) {
        Some(alert) => {
            alert.dismissed = true;
            true
        }
        None => false,
    }
}
